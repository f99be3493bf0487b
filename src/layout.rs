//! Document shell shared by every page: head, header with navigation, footer.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! all interpolated text is escaped.

use crate::config::{self, SiteConfig, SiteInfo};
use crate::display;
use crate::types::Page;
use chrono::{Datelike, FixedOffset, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Everything the renderers need that does not come from the content API.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub site: SiteInfo,
    /// Offset event timestamps are displayed at.
    pub offset: FixedOffset,
    /// Palette custom properties followed by the static stylesheet.
    pub css: String,
    /// Where the contact form posts to.
    pub contact_action: String,
}

impl SiteContext {
    pub fn new(config: &SiteConfig) -> Self {
        let color_css = config::generate_color_css(&config.colors);
        let public_url = config.server.public_url.trim_end_matches('/');
        Self {
            site: config.site.clone(),
            offset: display::offset_from_minutes(config.site.utc_offset_minutes),
            css: format!("{}\n\n{}", color_css, CSS_STATIC),
            contact_action: format!("{}{}", public_url, Page::Contact.path()),
        }
    }
}

impl Default for SiteContext {
    fn default() -> Self {
        Self::new(&SiteConfig::default())
    }
}

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    css: &str,
    refresh_secs: Option<u32>,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(secs) = refresh_secs {
                    meta http-equiv="refresh" content=(secs);
                }
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

fn page_title(ctx: &SiteContext, page: Page) -> String {
    match page {
        Page::Home => ctx.site.name.clone(),
        _ => format!("{} | {}", page.label(), ctx.site.name),
    }
}

fn body_class(page: Page) -> &'static str {
    match page {
        Page::Home => "page-home",
        Page::About => "page-about",
        Page::Services => "page-services",
        Page::Events => "page-events",
        Page::Contact => "page-contact",
    }
}

/// Renders the site header: church name, verse reference and navigation
fn site_header(ctx: &SiteContext, current: Page) -> Markup {
    html! {
        header.site-header {
            a.brand href=(Page::Home.path()) {
                span.brand-name { (ctx.site.name) }
                small.brand-verse { (ctx.site.verse_reference) }
            }
            nav.site-nav {
                (render_nav(current))
            }
        }
    }
}

/// Renders the navigation menu. On narrow screens the list collapses behind
/// a checkbox-driven toggle.
pub fn render_nav(current: Page) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle";
        label.nav-hamburger for="nav-toggle" aria-label="Menu" { "☰" }
        ul.nav-links {
            @for page in Page::ALL {
                @let is_current = page == current;
                li class=[is_current.then_some("current")] {
                    a href=(page.path()) aria-current=[is_current.then_some("page")] {
                        (page.label())
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &SiteContext) -> Markup {
    html! {
        footer.site-footer {
            div.footer-grid {
                div.footer-about {
                    h3 { (ctx.site.name) }
                    p.verse-reference { (ctx.site.verse_reference) }
                    p {
                        "Join us as we worship together, grow in faith, and serve our community with love and compassion."
                    }
                }
                div.footer-links {
                    h4 { "Quick Links" }
                    ul {
                        @for page in Page::ALL {
                            li {
                                a href=(page.path()) {
                                    @if page == Page::About { "About Us" } @else { (page.label()) }
                                }
                            }
                        }
                    }
                }
                div.footer-contact {
                    h4 { "Contact Info" }
                    p {
                        "📍 "
                        @for (i, line) in display::lines(&ctx.site.address).enumerate() {
                            @if i > 0 { br; }
                            (line)
                        }
                    }
                    p { "📞 " (ctx.site.phone) }
                    p { "✉️ " (ctx.site.email) }
                    div.footer-times {
                        p.footer-times-title { "Service Times:" }
                        p { "Sunday: 9:00 AM" }
                        p { "Wednesday: 7:00 PM" }
                    }
                }
            }
            div.footer-bottom {
                p { "© " (Utc::now().year()) " " (ctx.site.name) ". All rights reserved." }
                p.footer-verse {
                    "\"" (ctx.site.tagline) "\" - " (ctx.site.verse_reference)
                }
            }
        }
    }
}

/// A complete page: shell around `content`.
pub fn page_document(ctx: &SiteContext, page: Page, content: Markup) -> Markup {
    let body = html! {
        (site_header(ctx, page))
        main { (content) }
        (site_footer(ctx))
    };
    base_document(
        &page_title(ctx, page),
        &ctx.css,
        None,
        Some(body_class(page)),
        body,
    )
}

/// The loading view. Only a loading indicator, plus an optional refresh so
/// the browser comes back for the ready page.
pub fn loading_document(ctx: &SiteContext, page: Page, refresh_secs: Option<u32>) -> Markup {
    let body = html! {
        (site_header(ctx, page))
        main {
            div.loading role="status" { "Loading..." }
        }
        (site_footer(ctx))
    };
    base_document(
        &page_title(ctx, page),
        &ctx.css,
        refresh_secs,
        Some(body_class(page)),
        body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_renders_every_page() {
        let html = render_nav(Page::Home).into_string();
        for page in Page::ALL {
            assert!(html.contains(page.label()));
            assert!(html.contains(&format!(r#"href="{}""#, page.path())));
        }
    }

    #[test]
    fn nav_marks_current_item() {
        let html = render_nav(Page::Events).into_string();
        assert_eq!(html.matches(r#"class="current""#).count(), 1);
        assert!(html.contains(r#"<li class="current"><a href="/events" aria-current="page">"#));
    }

    #[test]
    fn nav_has_mobile_toggle() {
        let html = render_nav(Page::Home).into_string();
        assert!(html.contains(r#"id="nav-toggle""#));
        assert!(html.contains(r#"for="nav-toggle""#));
    }

    #[test]
    fn base_document_includes_doctype() {
        let content = html! { p { "test" } };
        let doc = base_document("Test", "body {}", None, None, content).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(!doc.contains("http-equiv"));
    }

    #[test]
    fn base_document_applies_body_class() {
        let content = html! { p { "test" } };
        let doc = base_document("Test", "", None, Some("page-events"), content).into_string();
        assert!(doc.contains(r#"<body class="page-events">"#));
    }

    #[test]
    fn page_titles() {
        let ctx = SiteContext::default();
        assert_eq!(page_title(&ctx, Page::Home), "Community Baptist Church");
        assert_eq!(page_title(&ctx, Page::Contact), "Contact | Community Baptist Church");
    }

    #[test]
    fn footer_uses_configured_contact_details() {
        let mut config = SiteConfig::default();
        config.site.address = "1 Chapel Lane\nSpringfield".into();
        config.site.phone = "555-0100".into();
        let html = site_footer(&SiteContext::new(&config)).into_string();
        assert!(html.contains("1 Chapel Lane<br>Springfield"));
        assert!(html.contains("555-0100"));
        assert!(html.contains("All rights reserved."));
        assert!(html.contains("Philippians 4:13"));
    }

    #[test]
    fn footer_copyright_carries_current_year() {
        let html = site_footer(&SiteContext::default()).into_string();
        let expected = format!("© {} Community Baptist Church.", Utc::now().year());
        assert!(html.contains(&expected), "{html}");
    }

    #[test]
    fn site_name_is_escaped() {
        let mut config = SiteConfig::default();
        config.site.name = "<script>alert('x')</script>".into();
        let ctx = SiteContext::new(&config);
        let doc = page_document(&ctx, Page::About, html! {}).into_string();
        assert!(!doc.contains("<script>"));
        assert!(doc.contains("&lt;script&gt;"));
    }

    #[test]
    fn css_carries_palette_and_static_styles() {
        let ctx = SiteContext::default();
        assert!(ctx.css.contains("--color-primary: #663399"));
        assert!(ctx.css.contains(".site-header"));
    }

    #[test]
    fn css_is_not_escaped() {
        let content = html! {};
        let doc = base_document("Test", ".a > .b { content: \"x\"; }", None, None, content)
            .into_string();
        assert!(doc.contains(r#"<style>.a > .b { content: "x"; }</style>"#));
    }

    #[test]
    fn contact_action_follows_public_url() {
        assert_eq!(SiteContext::default().contact_action, "/contact");

        let mut config = SiteConfig::default();
        config.server.public_url = "https://church.example.org/".into();
        assert_eq!(
            SiteContext::new(&config).contact_action,
            "https://church.example.org/contact"
        );
    }

    #[test]
    fn loading_document_refreshes() {
        let ctx = SiteContext::default();
        let doc = loading_document(&ctx, Page::Services, Some(2)).into_string();
        assert!(doc.contains("Loading..."));
        assert!(doc.contains(r#"<meta http-equiv="refresh" content="2">"#));
    }
}
