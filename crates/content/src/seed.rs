use time::OffsetDateTime;
use ulid::Ulid;

use crate::{
    Article, ArticleCategory, ArticleStore, MasterData, PickupPointInput, PolicyInput, PolicyKind,
    PolicyStore, SpeciesInput,
};

const PRIVACY_POLICY: &str = "\
BambooFlow collects your name, phone number, address, province and farm area \
to manage your registration and your pickup, cutting and seedling bookings.

Your LINE user id is used only to recognise you when you sign in. We do not \
read your LINE messages or your friend list.

Your data is shared with the partner factory only for the bookings you make. \
It is never sold or shared for advertising.

You can ask the administrator to correct or delete your data at any time.";

const TERMS: &str = "\
A booking is a request. It becomes binding only once the factory confirms it.

Please arrive at the pickup point on the booked day. Bookings that are not \
honoured may be rejected by the factory.

Quantities are counted in culms for pickup and cutting, and in plants for \
seedlings. The factory weighs and grades every delivery on arrival.

These terms may change. The current version is always shown during \
registration.";

const ARTICLES: [(&str, ArticleCategory, &str, &str); 4] = [
    (
        "ปลูกไผ่ให้โตไว",
        ArticleCategory::Cultivation,
        "เลือกพื้นที่ ระยะปลูก และการให้น้ำช่วงปีแรก",
        "ไผ่ชอบดินร่วนที่ระบายน้ำดี ควรปลูกระยะ 4x4 เมตร\n\nช่วงปีแรกให้น้ำสัปดาห์ละ 2 ครั้ง และคลุมโคนด้วยฟางเพื่อเก็บความชื้น",
    ),
    (
        "ตัดลำไผ่อย่างไรให้ได้ราคา",
        ArticleCategory::Harvesting,
        "อายุลำที่เหมาะสมและวิธีตัดที่ไม่ทำร้ายกอ",
        "ลำที่อายุ 3 ปีขึ้นไปให้เนื้อไม้แน่นที่สุด\n\nตัดเหนือข้อแรกจากพื้นดิน และเหลือลำอ่อนไว้อย่างน้อยครึ่งกอ",
    ),
    (
        "ด้วงหนวดยาวในไผ่",
        ArticleCategory::PestControl,
        "สังเกตอาการและป้องกันก่อนระบาด",
        "รูเจาะเล็ก ๆ ที่โคนลำคือสัญญาณแรก\n\nตัดลำที่ถูกทำลายออกและเผาทิ้งนอกแปลง",
    ),
    (
        "ราคารับซื้อประจำเดือน",
        ArticleCategory::Market,
        "ราคารับซื้อลำไผ่ตามเกรดของโรงงาน",
        "ราคาขึ้นกับเส้นผ่านศูนย์กลางและความตรงของลำ\n\nตรวจสอบราคาล่าสุดกับโรงงานก่อนจองคิวส่งทุกครั้ง",
    ),
];

const SPECIES: [(&str, u16); 3] = [("ไผ่ตง", 36), ("ไผ่ซางหม่น", 30), ("ไผ่รวก", 24)];

const PICKUP_POINTS: [(&str, &str); 2] = [
    ("ลานรับซื้อกบินทร์บุรี", "ปราจีนบุรี"),
    ("จุดรับไผ่ท่าม่วง", "กาญจนบุรี"),
];

/// Loads the policy texts, articles and master data shown on first boot.
pub async fn seed_content(
    articles: &ArticleStore,
    policies: &PolicyStore,
    master: &MasterData,
) -> bambooflow_shared::Result<()> {
    for (kind, title, body) in [
        (PolicyKind::Privacy, "Privacy policy", PRIVACY_POLICY),
        (PolicyKind::Terms, "Terms of service", TERMS),
    ] {
        policies
            .update(
                kind,
                PolicyInput {
                    title: title.to_owned(),
                    body: body.to_owned(),
                },
            )
            .await?;
    }

    let now = OffsetDateTime::now_utc().unix_timestamp();
    for (title, category, summary, body) in ARTICLES {
        articles
            .insert(Article {
                id: Ulid::new().to_string(),
                title: title.to_owned(),
                category,
                summary: summary.to_owned(),
                body: body.to_owned(),
                published: true,
                updated_at: now,
            })
            .await;
    }

    for (name, harvest_age_months) in SPECIES {
        master
            .add_species(SpeciesInput {
                name: name.to_owned(),
                harvest_age_months,
            })
            .await?;
    }

    for (name, province) in PICKUP_POINTS {
        master
            .add_pickup_point(PickupPointInput {
                name: name.to_owned(),
                province: province.to_owned(),
            })
            .await?;
    }

    Ok(())
}
