//! Static fallback content.
//!
//! Each page substitutes one of these datasets, wholesale, for any slot the
//! content API left empty. Several pages carry their own variant of the same
//! slot (the home page shows a shorter service list than the services page),
//! so datasets are named after the place they are rendered.

use crate::types::{ChurchInfo, Event, Service, StaffMember};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::sync::LazyLock;

const MISSION: &str = "To glorify God by making disciples who love Jesus, love each other, and love our community.";
const ADDRESS: &str = "123 Faith Street\nCommunity City, ST 12345";
const PHONE: &str = "(555) 123-4567";
const EMAIL: &str = "info@communitybaptist.org";

/// Church profile used by the home page sections and the contact page.
pub static CHURCH_INFO: LazyLock<ChurchInfo> = LazyLock::new(|| ChurchInfo {
    mission_statement: MISSION.into(),
    about_text: "Community Baptist Church has been a cornerstone of faith in our community for over 50 years. We are a welcoming congregation that believes in the power of God's love to transform lives and communities. Our mission is to glorify God by making disciples who love Jesus, love each other, and love our community. We strive to be a place where everyone can experience God's grace, find their purpose, and grow in their faith journey. Whether you're new to faith or have been walking with Jesus for years, you'll find a home here at Community Baptist Church.".into(),
    address: ADDRESS.into(),
    phone: PHONE.into(),
    email: EMAIL.into(),
});

/// Church profile used by the about page, which carries a shorter history.
pub static ABOUT_PAGE_INFO: LazyLock<ChurchInfo> = LazyLock::new(|| ChurchInfo {
    mission_statement: MISSION.into(),
    about_text: "Community Baptist Church has been a cornerstone of faith in our community for over 50 years. We are a welcoming congregation that believes in the power of God's love to transform lives and communities.".into(),
    address: ADDRESS.into(),
    phone: PHONE.into(),
    email: EMAIL.into(),
});

/// The about page hides its staff section when no staff are known.
pub static STAFF: LazyLock<Vec<StaffMember>> = LazyLock::new(Vec::new);

/// Services preview on the home page.
pub static HOME_SERVICES: LazyLock<Vec<Service>> = LazyLock::new(|| {
    vec![
        service(
            1,
            "Sunday Worship",
            "Join us for inspiring worship, biblical teaching, and fellowship every Sunday morning.",
            at(9, 0),
            "Sunday",
            "Main Sanctuary",
            "📖",
        ),
        service(
            2,
            "Bible Study",
            "Dive deeper into God's Word through interactive study and meaningful discussion.",
            at(19, 0),
            "Wednesday",
            "Fellowship Hall",
            "🙏",
        ),
        service(
            3,
            "Youth Ministry",
            "Engaging activities and biblical teaching designed specifically for teens and young adults.",
            at(18, 0),
            "Friday",
            "Youth Center",
            "👨‍👩‍👧‍👦",
        ),
        service(
            4,
            "Community Outreach",
            "Serving our community through food drives, community events, and volunteer opportunities.",
            None,
            "Monthly",
            "Various Locations",
            "❤️",
        ),
    ]
});

/// Full service listing on the services page.
pub static SERVICES: LazyLock<Vec<Service>> = LazyLock::new(|| {
    vec![
        service(
            1,
            "Sunday Worship Service",
            "Join us for our main worship service featuring contemporary music, biblical preaching, and communion. Our service is designed to help you connect with God and grow in your faith.",
            at(10, 0),
            "Sunday",
            "Main Sanctuary",
            "⛪",
        ),
        service(
            2,
            "Wednesday Bible Study",
            "Dive deeper into God's Word through our interactive Bible study. We explore different books of the Bible and discuss how to apply biblical principles to our daily lives.",
            at(19, 0),
            "Wednesday",
            "Fellowship Hall",
            "📖",
        ),
        service(
            3,
            "Friday Youth Ministry",
            "A dynamic program for teenagers featuring games, music, biblical teaching, and fellowship. We focus on helping young people develop a strong foundation of faith.",
            at(18, 0),
            "Friday",
            "Youth Center",
            "🎯",
        ),
        service(
            4,
            "Children's Sunday School",
            "Age-appropriate Bible lessons, crafts, and activities for children ages 3-12. Our trained teachers create a fun and safe environment for learning about Jesus.",
            at(9, 0),
            "Sunday",
            "Children's Wing",
            "👶",
        ),
        service(
            5,
            "Adult Sunday School",
            "In-depth Bible study and discussion for adults. Multiple classes available covering different topics and books of the Bible.",
            at(9, 0),
            "Sunday",
            "Various Classrooms",
            "👥",
        ),
        service(
            6,
            "Prayer Meeting",
            "Join us for a time of corporate prayer, intercession, and seeking God's will for our church and community.",
            at(19, 0),
            "Tuesday",
            "Prayer Room",
            "🙏",
        ),
    ]
});

/// Featured events preview on the home page.
pub static FEATURED_EVENTS: LazyLock<Vec<Event>> = LazyLock::new(|| {
    vec![
        event(
            1,
            "Community BBQ",
            "Join us for our annual community barbecue! Food, games, and fellowship for the whole family. Everyone is welcome!",
            on(2025, 7, 28, 12),
            "Church Pavilion",
            true,
            None,
        ),
        event(
            2,
            "Baptism Sunday",
            "Celebrating new life in Christ! If you're ready to take this important step of faith, please contact Pastor Johnson.",
            on(2025, 8, 5, 10),
            "Main Sanctuary",
            true,
            None,
        ),
        event(
            3,
            "Back to School Prayer",
            "Special prayer service for students, teachers, and school staff as we begin the new academic year.",
            on(2025, 8, 12, 19),
            "Main Sanctuary",
            true,
            None,
        ),
    ]
});

/// Event calendar on the events page.
pub static EVENTS: LazyLock<Vec<Event>> = LazyLock::new(|| {
    vec![
        event(
            1,
            "Community BBQ",
            "Join us for our annual community barbecue! Food, games, and fellowship for the whole family. Everyone is welcome! We'll have live music, children's activities, and plenty of delicious food.",
            on(2025, 7, 28, 12),
            "Church Pavilion",
            true,
            Some(false),
        ),
        event(
            2,
            "Baptism Sunday",
            "Celebrating new life in Christ! If you're ready to take this important step of faith, please contact Pastor Johnson. We'll have a special service celebrating those being baptized.",
            on(2025, 8, 5, 10),
            "Main Sanctuary",
            true,
            Some(true),
        ),
        event(
            3,
            "Back to School Prayer",
            "Special prayer service for students, teachers, and school staff as we begin the new academic year. Join us as we pray for wisdom, safety, and success in the coming school year.",
            on(2025, 8, 12, 19),
            "Main Sanctuary",
            true,
            Some(false),
        ),
        event(
            4,
            "Youth Summer Camp",
            "A week-long adventure for teens featuring outdoor activities, worship, and spiritual growth. Camp includes swimming, hiking, campfires, and daily devotions.",
            on(2025, 8, 18, 9),
            "Pine Lake Camp",
            false,
            Some(true),
        ),
        event(
            5,
            "Women's Bible Study Retreat",
            "A weekend retreat focused on spiritual growth, fellowship, and renewal. Includes meals, accommodations, and inspiring speakers.",
            on(2025, 9, 1, 18),
            "Mountain View Retreat Center",
            false,
            Some(true),
        ),
        event(
            6,
            "Men's Breakfast",
            "Monthly gathering for men featuring breakfast, fellowship, and biblical discussion. All men are welcome to join us for this time of community.",
            on(2025, 8, 15, 8),
            "Fellowship Hall",
            false,
            Some(false),
        ),
    ]
});

fn at(hour: u32, minute: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(hour, minute, 0)
}

fn on(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

fn service(
    id: u64,
    name: &str,
    description: &str,
    time: Option<NaiveTime>,
    day_of_week: &str,
    location: &str,
    icon: &str,
) -> Service {
    Service {
        id,
        name: name.into(),
        description: description.into(),
        time,
        day_of_week: day_of_week.into(),
        location: location.into(),
        icon: Some(icon.into()),
    }
}

fn event(
    id: u64,
    title: &str,
    description: &str,
    date: DateTime<Utc>,
    location: &str,
    is_featured: bool,
    registration_required: Option<bool>,
) -> Event {
    Event {
        id,
        title: title.into(),
        description: description.into(),
        date,
        location: location.into(),
        is_featured,
        registration_required,
    }
}
