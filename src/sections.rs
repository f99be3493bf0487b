//! Page sections and cards.
//!
//! Every function here is a pure function of its arguments. Optional record
//! fields degrade quietly: no icon shows `⛪`, no service time drops the time
//! text, no photo shows a placeholder glyph, no email drops the mail link,
//! and only `registration_required == Some(true)` offers registration.

use crate::contact::{ContactError, ContactFlow, SubmitStatus};
use crate::display::{self, event_date};
use crate::layout::SiteContext;
use crate::types::{ChurchInfo, Event, Page, Service, StaffMember};
use chrono::FixedOffset;
use maud::{Markup, html};

const DEFAULT_SERVICE_ICON: &str = "⛪";
const STAFF_PLACEHOLDER: &str = "👤";

/// Subjects offered by the contact form, in display order.
pub const CONTACT_SUBJECTS: [&str; 7] = [
    "General Inquiry",
    "Prayer Request",
    "New Member Information",
    "Event Registration",
    "Volunteer Opportunities",
    "Pastor Meeting Request",
    "Other",
];

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! We'll get back to you soon.";
pub const ERROR_MESSAGE: &str =
    "Sorry, there was an error sending your message. Please try again or call us directly.";
pub const IN_FLIGHT_MESSAGE: &str =
    "Your message is already being sent. Please wait a moment before sending it again.";

// ============================================================================
// Shared pieces
// ============================================================================

/// Heading plus lead paragraph used at the top of most sections.
fn section_heading(title: &str, lead: &str) -> Markup {
    html! {
        div.section-heading {
            h2 { (title) }
            p { (lead) }
        }
    }
}

/// Banner at the top of the inner pages.
pub fn page_hero(title: &str, lead: &str) -> Markup {
    html! {
        section.page-hero {
            h1 { (title) }
            p.lead { (lead) }
        }
    }
}

/// Closing banner with two links.
pub fn call_to_action(
    title: &str,
    text: &str,
    primary: (&str, &str),
    secondary: (&str, &str),
) -> Markup {
    html! {
        section.cta {
            h2 { (title) }
            p { (text) }
            div.cta-links {
                a.button.button-accent href=(primary.1) { (primary.0) }
                a.button.button-outline href=(secondary.1) { (secondary.0) }
            }
        }
    }
}

// ============================================================================
// Home
// ============================================================================

pub fn hero(ctx: &SiteContext) -> Markup {
    html! {
        section.hero {
            h1 {
                "Welcome to "
                span.highlight { (ctx.site.name) }
            }
            p.hero-verse { "\"" (ctx.site.tagline) "\"" }
            p.hero-reference { "- " (ctx.site.verse_reference) }
            p.hero-lead {
                "Join us as we worship together, grow in faith, and serve our community with love and compassion. Experience God's grace and find your purpose in our welcoming fellowship."
            }
            div.hero-links {
                a.button.button-accent href=(Page::Services.path()) { "Join Us Sunday" }
                a.button.button-outline href=(Page::About.path()) { "Learn More" }
            }
            div.hero-times {
                h3 { "Join Us This Week" }
                div.hero-times-grid {
                    div {
                        p.strong { "Sunday Worship" }
                        p { "9:00 AM" }
                    }
                    div {
                        p.strong { "Bible Study" }
                        p { "Wednesday 7:00 PM" }
                    }
                }
            }
        }
    }
}

/// `Sunday • 9:00 AM`, or just the day when the time is unknown.
fn service_schedule(service: &Service) -> String {
    match service.time {
        Some(time) => format!("{} • {}", service.day_of_week, display::time_of_day(time)),
        None => service.day_of_week.clone(),
    }
}

pub fn service_card(service: &Service) -> Markup {
    let icon = service
        .icon
        .as_deref()
        .filter(|icon| !icon.is_empty())
        .unwrap_or(DEFAULT_SERVICE_ICON);
    html! {
        article.service-card {
            div.service-icon { (icon) }
            h3 { (service.name) }
            div.service-schedule { (service_schedule(service)) }
            p { (service.description) }
            @if !service.location.is_empty() {
                p.location { "📍 " (service.location) }
            }
        }
    }
}

pub fn services_section(services: &[Service]) -> Markup {
    html! {
        section.services id="services" {
            (section_heading(
                "Our Services & Ministries",
                "We offer various opportunities for worship, learning, and fellowship throughout the week. Join us as we grow together in faith.",
            ))
            div.card-grid.cols-4 {
                @for service in services {
                    (service_card(service))
                }
            }
        }
    }
}

pub fn about_section(info: &ChurchInfo) -> Markup {
    html! {
        section.about id="about" {
            div.about-text {
                h2 { "About Our Church" }
                div.mission {
                    h3 { "Our Mission" }
                    p { (info.mission_statement) }
                }
                @for paragraph in display::lines(&info.about_text) {
                    p { (paragraph) }
                }
                div.stats {
                    @for (value, label) in [("50+", "Years Serving"), ("15+", "Members"), ("5+", "Ministries")] {
                        div.stat {
                            div.stat-value { (value) }
                            div.stat-label { (label) }
                        }
                    }
                }
            }
            aside.core-values {
                h4 { "Our Core Values" }
                ul {
                    @for value in ["Biblical Teaching", "Authentic Community", "Compassionate Service", "Faithful Worship"] {
                        li { (value) }
                    }
                }
            }
        }
    }
}

/// Compact event card used on the home page.
pub fn event_card(event: &Event, offset: FixedOffset) -> Markup {
    let date = event_date(&event.date, offset);
    html! {
        article.event-card {
            header {
                span.date-badge { (date.short()) }
                span.event-time { (date.time) }
                h3 { (event.title) }
            }
            p { (event.description) }
            p.location { "📍 " (event.location) }
            @if event.needs_registration() {
                a.button.button-accent href=(Page::Contact.path()) { "Register Now" }
            }
        }
    }
}

pub fn events_section(events: &[Event], offset: FixedOffset) -> Markup {
    html! {
        section.events id="events" {
            (section_heading(
                "Upcoming Events",
                "Join us for these special events as we fellowship together and grow in our faith. All are welcome to participate in our church community activities.",
            ))
            div.card-grid.cols-3 {
                @for event in events {
                    (event_card(event, offset))
                }
            }
            div.section-footer {
                a.button.button-primary href=(Page::Events.path()) { "View All Events" }
            }
        }
    }
}

// ============================================================================
// About
// ============================================================================

pub fn staff_card(member: &StaffMember) -> Markup {
    html! {
        article.staff-card {
            div.staff-photo {
                @match member.photo.as_deref().filter(|p| !p.is_empty()) {
                    Some(photo) => {
                        img src=(photo) alt=(member.name) loading="lazy";
                    }
                    None => {
                        span.placeholder { (STAFF_PLACEHOLDER) }
                    }
                }
            }
            h3 { (member.name) }
            p.position { (member.position) }
            p.bio { (member.bio) }
            @if let Some(email) = member.email.as_deref().filter(|e| !e.is_empty()) {
                a.staff-email href={ "mailto:" (email) } { (email) }
            }
        }
    }
}

/// Staff grid. Renders nothing for an empty list.
pub fn staff_section(staff: &[StaffMember]) -> Markup {
    html! {
        @if !staff.is_empty() {
            section.staff {
                (section_heading(
                    "Our Staff",
                    "Meet the dedicated individuals who serve our congregation and community with passion and commitment.",
                ))
                div.card-grid.cols-3 {
                    @for member in staff {
                        (staff_card(member))
                    }
                }
            }
        }
    }
}

// ============================================================================
// Events
// ============================================================================

/// Large card for the featured strip on the events page.
pub fn featured_event_card(event: &Event, offset: FixedOffset) -> Markup {
    let date = event_date(&event.date, offset);
    html! {
        article.event-card.featured {
            header {
                span.date-badge { (date.short()) }
                span.badge { "Featured" }
                h3 { (event.title) }
                p.event-when { (date.full_date) " at " (date.time) }
            }
            p { (event.description) }
            p.location { "📍 " (event.location) }
            @if event.needs_registration() {
                a.button.button-accent href=(Page::Contact.path()) { "Register Now" }
            }
        }
    }
}

/// Featured strip. Renders nothing when no event is featured.
pub fn featured_events_section(featured: &[&Event], offset: FixedOffset) -> Markup {
    html! {
        @if !featured.is_empty() {
            section.featured-events {
                (section_heading(
                    "Featured Events",
                    "Don't miss these special upcoming events in our church community.",
                ))
                div.card-grid.cols-3 {
                    @for event in featured {
                        (featured_event_card(event, offset))
                    }
                }
            }
        }
    }
}

/// One row of the full calendar.
pub fn event_row(event: &Event, offset: FixedOffset) -> Markup {
    let date = event_date(&event.date, offset);
    html! {
        article.event-row {
            div.date-block {
                div.month { (date.month) }
                div.day { (date.day) }
                div.weekday { (date.weekday) }
            }
            div.event-body {
                h3 {
                    (event.title)
                    @if event.is_featured {
                        " "
                        span.badge { "Featured" }
                    }
                }
                p { (event.description) }
                p.event-meta {
                    span { "🕐 " (date.time) }
                    " "
                    span { "📍 " (event.location) }
                }
            }
            div.event-actions {
                @if event.needs_registration() {
                    a.button.button-accent href=(Page::Contact.path()) { "Register" }
                }
                a.button.button-outline href=(Page::Contact.path()) { "Learn More" }
            }
        }
    }
}

pub fn event_list_section(events: &[Event], offset: FixedOffset) -> Markup {
    html! {
        section.event-list {
            (section_heading(
                "All Upcoming Events",
                "View our complete calendar of upcoming church activities and events.",
            ))
            @for event in events {
                (event_row(event, offset))
            }
        }
    }
}

// ============================================================================
// Contact
// ============================================================================

/// Service times listed beside the home page's contact form.
pub const HOME_SERVICE_TIMES: [&str; 3] = [
    "Sunday Worship: 9:00 AM",
    "Wednesday Bible Study: 7:00 PM",
    "Friday Youth Ministry: 6:00 PM",
];

/// Service times listed on the contact page.
pub const CONTACT_SERVICE_TIMES: [&str; 3] = [
    "Sunday Worship: 10:00 AM",
    "Wednesday Bible Study: 7:00 PM",
    "Friday Youth Ministry: 6:00 PM",
];

pub fn contact_details(info: &ChurchInfo, service_times: &[&str]) -> Markup {
    html! {
        div.contact-details {
            h2 { "Get In Touch" }
            div.contact-item {
                h3 { "Visit Us" }
                p.address {
                    @for (i, line) in display::lines(&info.address).enumerate() {
                        @if i > 0 { br; }
                        (line)
                    }
                }
            }
            div.contact-item {
                h3 { "Call Us" }
                p { (info.phone) }
                p.note { "Monday - Friday: 9:00 AM - 5:00 PM" }
            }
            div.contact-item {
                h3 { "Email Us" }
                p { (info.email) }
                p.note { "We'll respond within 24 hours" }
            }
            div.contact-item {
                h3 { "Service Times" }
                @for line in service_times {
                    p { (line) }
                }
            }
        }
    }
}

/// The contact form, reflecting the flow's fields and last outcome.
///
/// `rejected` explains a submission that never reached the API.
pub fn contact_form(action: &str, flow: &ContactFlow, rejected: Option<&ContactError>) -> Markup {
    let form = flow.form();
    let submitting = flow.is_submitting();
    html! {
        div.contact-form {
            h2 { "Send Us a Message" }
            form method="post" action=(action) {
                div.form-row {
                    div.field {
                        label for="name" { "Full Name *" }
                        input type="text" id="name" name="name" value=(form.name)
                            required placeholder="Your Name";
                    }
                    div.field {
                        label for="email" { "Email Address *" }
                        input type="email" id="email" name="email" value=(form.email)
                            required placeholder="your.email@example.com";
                    }
                }
                div.field {
                    label for="subject" { "Subject *" }
                    select id="subject" name="subject" required {
                        option value="" { "Select a subject" }
                        @for subject in CONTACT_SUBJECTS {
                            option value=(subject) selected[form.subject == subject] { (subject) }
                        }
                    }
                }
                div.field {
                    label for="message" { "Your Message *" }
                    textarea id="message" name="message" rows="6" required
                        placeholder="Please share your message, questions, or prayer requests..." {
                        (form.message)
                    }
                }
                button.button.button-primary type="submit" disabled[submitting] {
                    @if submitting { "Sending..." } @else { "Send Message" }
                }
                @match rejected {
                    Some(ContactError::InFlight) => {
                        div.notice.notice-info role="status" { (IN_FLIGHT_MESSAGE) }
                    }
                    Some(reason) => {
                        div.notice.notice-error role="alert" { "Please check the form: " (reason) "." }
                    }
                    None => {}
                }
                @match flow.status() {
                    SubmitStatus::Success => {
                        div.notice.notice-success role="status" { (SUCCESS_MESSAGE) }
                    }
                    SubmitStatus::Error => {
                        div.notice.notice-error role="alert" { (ERROR_MESSAGE) }
                    }
                    SubmitStatus::Idle | SubmitStatus::Submitting => {}
                }
            }
        }
    }
}

pub fn map_placeholder() -> Markup {
    html! {
        section.map {
            (section_heading(
                "Find Us",
                "We're located in the heart of the community, easily accessible with parking available.",
            ))
            div.map-placeholder {
                div.map-icon { "🗺️" }
                p { "Interactive map would be embedded here" }
            }
        }
    }
}
