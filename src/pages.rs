//! Page renderers.
//!
//! A page renders from its [`PageState`]: the loading view while loading,
//! otherwise its sections, with each empty slot replaced wholesale by the
//! page's fallback dataset.

use crate::contact::{ContactError, ContactFlow};
use crate::fallback;
use crate::layout::{self, SiteContext};
use crate::loader::{
    AboutData, ContactData, EventsData, HomeData, PageData, PageState, ServicesData, or_fallback,
};
use crate::sections;
use crate::types::{Page, partition_events};
use maud::{Markup, html};

/// A page's ready view.
pub trait RenderPage: PageData {
    fn render(&self, ctx: &SiteContext) -> Markup;
}

/// Render a page in whatever state it is in.
pub fn render<D: RenderPage>(ctx: &SiteContext, state: &PageState<D>) -> Markup {
    match state {
        PageState::Loading => layout::loading_document(ctx, D::PAGE, None),
        PageState::Ready(data) => data.render(ctx),
    }
}

impl RenderPage for HomeData {
    fn render(&self, ctx: &SiteContext) -> Markup {
        let info = or_fallback(&self.church_info, &*fallback::CHURCH_INFO);
        let services = or_fallback(&self.services, &*fallback::HOME_SERVICES);
        let events = or_fallback(&self.featured_events, &*fallback::FEATURED_EVENTS);

        let content = html! {
            (sections::hero(ctx))
            (sections::services_section(services))
            (sections::about_section(info))
            (sections::events_section(events, ctx.offset))
            section.contact id="contact" {
                (sections::contact_details(info, &sections::HOME_SERVICE_TIMES))
                (sections::contact_form(&ctx.contact_action, &ContactFlow::default(), None))
            }
        };
        layout::page_document(ctx, Page::Home, content)
    }
}

impl RenderPage for AboutData {
    fn render(&self, ctx: &SiteContext) -> Markup {
        let info = or_fallback(&self.church_info, &*fallback::ABOUT_PAGE_INFO);
        let staff = or_fallback(&self.staff, &*fallback::STAFF);

        let content = html! {
            (sections::page_hero(
                "About Our Church",
                "Discover our history, mission, and the people who make our church a place where faith comes alive and community thrives.",
            ))
            section.mission {
                div.mission-text {
                    h2 { "Our Mission" }
                    blockquote { (info.mission_statement) }
                    p { (info.about_text) }
                }
                div.mission-aside {
                    div.beliefs {
                        h3 { "Our Beliefs" }
                        ul {
                            @for belief in BELIEFS {
                                li { "✓ " (belief) }
                            }
                        }
                    }
                    div.vision {
                        h3 { "Our Vision" }
                        p {
                            "To be a beacon of hope and love in our community, where people from all walks of life can experience God's transforming grace and find their purpose in serving others."
                        }
                    }
                }
            }
            (sections::staff_section(staff))
            (sections::call_to_action(
                "Ready to Join Our Family?",
                "We'd love to welcome you into our church community. Come as you are!",
                ("Get In Touch", Page::Contact.path()),
                ("Visit This Sunday", Page::Services.path()),
            ))
        };
        layout::page_document(ctx, Page::About, content)
    }
}

const BELIEFS: [&str; 5] = [
    "The Bible as God's inspired Word",
    "Salvation through faith in Jesus Christ",
    "The importance of baptism and communion",
    "The power of prayer and fellowship",
    "Service to our community and world",
];

const WHAT_TO_EXPECT: [(&str, &str, &str); 4] = [
    (
        "👋",
        "Warm Welcome",
        "Our friendly greeters will welcome you and help you feel at home.",
    ),
    (
        "🎵",
        "Inspiring Music",
        "Contemporary worship music that lifts your spirit and glorifies God.",
    ),
    (
        "📖",
        "Biblical Teaching",
        "Practical, life-applicable messages from God's Word.",
    ),
    (
        "☕",
        "Fellowship Time",
        "Connect with others over coffee and refreshments after service.",
    ),
];

impl RenderPage for ServicesData {
    fn render(&self, ctx: &SiteContext) -> Markup {
        let services = or_fallback(&self.services, &*fallback::SERVICES);

        let content = html! {
            (sections::page_hero(
                "Our Services",
                "Join us for worship, fellowship, and spiritual growth throughout the week. There's a place for everyone in our church family.",
            ))
            section.service-list {
                div.card-grid.cols-3 {
                    @for service in services {
                        (sections::service_card(service))
                    }
                }
            }
            section.what-to-expect {
                div.section-heading {
                    h2 { "What to Expect" }
                    p { "If you're new to our church, here's what you can expect when you visit us." }
                }
                div.card-grid.cols-4 {
                    @for (icon, title, description) in WHAT_TO_EXPECT {
                        div.expect-item {
                            div.expect-icon { (icon) }
                            h3 { (title) }
                            p { (description) }
                        }
                    }
                }
            }
            (sections::call_to_action(
                "Join Us This Week",
                "We'd love to have you worship with us! Come as you are and experience God's love in our welcoming community.",
                ("Plan Your Visit", Page::Contact.path()),
                ("View Events", Page::Events.path()),
            ))
        };
        layout::page_document(ctx, Page::Services, content)
    }
}

impl RenderPage for EventsData {
    fn render(&self, ctx: &SiteContext) -> Markup {
        let events = or_fallback(&self.events, &*fallback::EVENTS);
        let partition = partition_events(events);

        let content = html! {
            (sections::page_hero(
                "Church Events",
                "Join us for fellowship, worship, and community events throughout the year. There's always something happening at our church!",
            ))
            (sections::featured_events_section(&partition.featured, ctx.offset))
            (sections::event_list_section(events, ctx.offset))
            (sections::call_to_action(
                "Stay Connected",
                "Don't miss out on upcoming events and announcements. Get in touch to hear about what's next.",
                ("Contact Us", Page::Contact.path()),
                ("View Services", Page::Services.path()),
            ))
        };
        layout::page_document(ctx, Page::Events, content)
    }
}

impl RenderPage for ContactData {
    fn render(&self, ctx: &SiteContext) -> Markup {
        contact(ctx, self, &ContactFlow::default(), None)
    }
}

/// The contact page with the form in the given state.
pub fn contact(
    ctx: &SiteContext,
    data: &ContactData,
    flow: &ContactFlow,
    rejected: Option<&ContactError>,
) -> Markup {
    let info = or_fallback(&data.church_info, &*fallback::CHURCH_INFO);

    let content = html! {
        (sections::page_hero(
            "Contact Us",
            "We'd love to hear from you! Whether you have questions, need prayer, or want to get involved, don't hesitate to reach out.",
        ))
        section.contact {
            (sections::contact_details(info, &sections::CONTACT_SERVICE_TIMES))
            (sections::contact_form(&ctx.contact_action, flow, rejected))
        }
        (sections::map_placeholder())
    };
    layout::page_document(ctx, Page::Contact, content)
}
