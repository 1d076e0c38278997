mod article;
mod master;
mod policy;
mod seed;

pub use article::*;
pub use master::*;
pub use policy::*;
pub use seed::*;

/// Splits a stored body into paragraphs on blank lines.
pub fn paragraphs(body: &str) -> Vec<String> {
    body.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
