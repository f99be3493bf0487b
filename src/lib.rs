//! # Church Site
//!
//! Website for a church: five pages (home, about, services, events, contact)
//! rendered from an external content API, with a built-in fallback for every
//! piece of content the API does not supply.
//!
//! # Architecture: Load, Fall Back, Render
//!
//! Every page goes through the same three steps:
//!
//! ```text
//! 1. Load       content API  →  PageState::Ready(data)   (concurrent requests, failures become empty slots)
//! 2. Fall back  empty slots  →  fallback datasets        (wholesale, per slot)
//! 3. Render     page data    →  HTML                     (maud)
//! ```
//!
//! The site can be served live (`church-site serve`), where each request is a
//! fresh page activation, or rendered once to static files
//! (`church-site render`).
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Content records (`ChurchInfo`, `StaffMember`, `Service`, `Event`), `ContactForm`, `Page` |
//! | [`api`] | `ChurchApi` trait, the HTTP client, and the in-memory implementation |
//! | [`fallback`] | Static fallback datasets, named after where they render |
//! | [`loader`] | Page data acquisition: `PageState`, `PageInstance`, per-page data structs |
//! | [`contact`] | Contact submission state machine |
//! | [`display`] | Date, time, and text formatting |
//! | [`layout`] | Document shell: head, header with navigation, footer |
//! | [`sections`] | Page sections and cards |
//! | [`pages`] | Page renderers applying the fallback rule |
//! | [`generate`] | Static rendering of every page to disk |
//! | [`server`] | axum router, handlers, and graceful shutdown |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`output`] | CLI output formatting for `render` and `check` |
//!
//! # Design Decisions
//!
//! ## Failures Are Silent, Fallbacks Are Wholesale
//!
//! A page never shows an API error. A failed, timed-out, or empty request
//! leaves its slot empty, and an empty slot renders the page's fallback
//! dataset in full; loaded and fallback records are never mixed inside one
//! slot. Failures are logged at `warn`. The contact form is the exception: a
//! failed submission is always shown to the visitor.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time HTML
//! macro system, rather than Handlebars or Tera. Advantages:
//!
//! - **Compile-time checking**: malformed HTML is a build error, not a runtime surprise.
//! - **Type-safe**: template variables are Rust expressions, no stringly-typed lookups.
//! - **XSS-safe by default**: all interpolation is auto-escaped, including
//!   everything the content API sends.
//! - **Zero runtime files**: no template directory to ship or get out of sync.
//!
//! ## Late Responses Never Touch a Dropped Page
//!
//! A page's load task holds only a weak reference to the page state and is
//! aborted when the [`loader::PageInstance`] is dropped. A server request
//! that gives up waiting therefore cannot be written to after the fact.
//!
//! ## No JavaScript
//!
//! The mobile navigation is a CSS checkbox toggle and the contact form is a
//! plain HTML form post. Every page works with scripting disabled.

pub mod api;
pub mod config;
pub mod contact;
pub mod display;
pub mod fallback;
pub mod generate;
pub mod layout;
pub mod loader;
pub mod output;
pub mod pages;
pub mod sections;
pub mod server;
pub mod types;
