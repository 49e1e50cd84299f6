pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;
pub use crate::config::ClientConfig;

pub use crate::core::{
    client::PageClient,
    cookie::{get_cookie, CookieTokenReader, StaticCookieJar},
    fragment::FragmentLoader,
    page::{HtmlForm, MemoryRegion, Page},
    submit::FormSubmitter,
};
pub use crate::utils::error::{ClientError, Result};
