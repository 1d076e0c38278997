use serde::{Deserialize, Serialize};

use crate::{LineProfile, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Loading,
    #[default]
    Unauthenticated,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Registering,
    Pending,
    NotApproved,
}

/// What the farmer repository knows about the visitor, looked up only on
/// the farmer entry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FarmerStanding {
    Approved { farmer_id: String },
    Pending { farmer_id: String },
    NotApproved { farmer_id: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub role: Option<Role>,
    pub auth_status: AuthStatus,
    pub registration_status: Option<RegistrationStatus>,
    pub line_profile: Option<LineProfile>,
    pub farmer_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ShowRoleSelector,
    SelectRole(Role),
    StartRegistration,
    LineSignedIn {
        profile: LineProfile,
        standing: Option<FarmerStanding>,
    },
    DirectLogin(Role),
    CredentialsAccepted(Role),
    RegistrationSubmitted {
        farmer_id: String,
        approved: bool,
    },
    /// The farmer record behind a signed-in farmer was reviewed again.
    StandingChanged(FarmerStanding),
    Logout,
}

/// The page a session belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    RoleSelector,
    Login(Role),
    Registration,
    PendingApproval,
    Rejected,
    Dashboard(Role),
}

impl Screen {
    pub fn path(&self) -> &'static str {
        match self {
            Screen::Loading | Screen::RoleSelector => "/",
            Screen::Login(_) => "/login",
            Screen::Registration => "/register",
            Screen::PendingApproval => "/register/pending",
            Screen::Rejected => "/register/rejected",
            Screen::Dashboard(role) => role.home_path(),
        }
    }
}

impl Session {
    /// State of a visitor whose entry url has not been resolved yet.
    pub fn loading() -> Self {
        Self {
            auth_status: AuthStatus::Loading,
            ..Default::default()
        }
    }

    fn authenticated(role: Role) -> Self {
        Self {
            role: Some(role),
            auth_status: AuthStatus::Authenticated,
            ..Default::default()
        }
    }

    fn targeting(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    fn farmer(line_profile: Option<LineProfile>, standing: Option<FarmerStanding>) -> Self {
        let (auth_status, registration_status, farmer_id) = match standing {
            Some(FarmerStanding::Approved { farmer_id }) => {
                (AuthStatus::Authenticated, None, Some(farmer_id))
            }
            Some(FarmerStanding::Pending { farmer_id }) => (
                AuthStatus::Unauthenticated,
                Some(RegistrationStatus::Pending),
                Some(farmer_id),
            ),
            Some(FarmerStanding::NotApproved { farmer_id }) => (
                AuthStatus::Unauthenticated,
                Some(RegistrationStatus::NotApproved),
                Some(farmer_id),
            ),
            None => (
                AuthStatus::Unauthenticated,
                Some(RegistrationStatus::Registering),
                None,
            ),
        };

        Self {
            role: Some(Role::Farmer),
            auth_status,
            registration_status,
            line_profile,
            farmer_id,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_status == AuthStatus::Authenticated && self.role.is_some()
    }

    pub fn is_authenticated_as(&self, role: Role) -> bool {
        self.is_authenticated() && self.role == Some(role)
    }

    pub fn apply(self, event: Event) -> Self {
        match event {
            Event::ShowRoleSelector | Event::Logout => Self::default(),
            Event::SelectRole(role) => Self::targeting(role),
            Event::StartRegistration => Self {
                role: Some(Role::Farmer),
                registration_status: Some(RegistrationStatus::Registering),
                line_profile: self.line_profile,
                ..Default::default()
            },
            Event::LineSignedIn { profile, standing } => Self::farmer(Some(profile), standing),
            Event::StandingChanged(_) if self.role != Some(Role::Farmer) => self,
            Event::StandingChanged(standing) => Self::farmer(self.line_profile, Some(standing)),
            Event::DirectLogin(role) if role.allows_direct_login() => Self::authenticated(role),
            Event::DirectLogin(role) => Self::targeting(role),
            Event::CredentialsAccepted(Role::Farmer) => self,
            Event::CredentialsAccepted(role) => Self::authenticated(role),
            Event::RegistrationSubmitted {
                farmer_id,
                approved,
            } => {
                if self.registration_status != Some(RegistrationStatus::Registering) {
                    return self;
                }

                Self {
                    role: Some(Role::Farmer),
                    auth_status: if approved {
                        AuthStatus::Authenticated
                    } else {
                        AuthStatus::Unauthenticated
                    },
                    registration_status: (!approved).then_some(RegistrationStatus::Pending),
                    line_profile: self.line_profile,
                    farmer_id: Some(farmer_id),
                }
            }
        }
    }

    pub fn screen(&self) -> Screen {
        match (self.auth_status, self.registration_status, self.role) {
            (AuthStatus::Loading, _, _) => Screen::Loading,
            (AuthStatus::Authenticated, _, Some(role)) => Screen::Dashboard(role),
            (_, Some(RegistrationStatus::Registering), _) => Screen::Registration,
            (_, Some(RegistrationStatus::Pending), _) => Screen::PendingApproval,
            (_, Some(RegistrationStatus::NotApproved), _) => Screen::Rejected,
            (_, None, Some(role)) => Screen::Login(role),
            (_, None, None) => Screen::RoleSelector,
        }
    }
}
