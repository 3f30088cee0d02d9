//! # CLI Module
//!
//! User facing commands of the `musicfinder` binary. Each command delegates to
//! the library modules and handles progress feedback, tables and error
//! presentation. Fatal problems end the process through [`crate::error!`].
//!
//! ## Commands
//!
//! ### Authentication
//!
//! - [`auth`] - Spotify OAuth PKCE flow, token is cached for later use
//!
//! ### Parsing
//!
//! - [`extract`] - mentions in a local file or stdin
//! - [`parse`] - mentions in a YouTube video or web page, optionally turned
//!   into a playlist (`--playlist`) or MP3 downloads (`--download`)
//!
//! ### Sample Lab
//!
//! - [`add_sample`], [`remove_sample`], [`list_samples`] - the sample vault
//! - [`download_sample`] - fetch a vault entry as MP3 via yt-dlp
//! - [`lookup_sample`] - what a vault entry samples
//! - [`list_downloads`], [`delete_download`] - the download directory
//!
//! ### Server
//!
//! - [`serve`] - the HTTP API on `SERVER_ADDRESS`
//!
//! ## Usage
//!
//! ```bash
//! musicfinder auth
//! musicfinder parse https://www.youtube.com/watch?v=dQw4w9WgXcQ --playlist
//! pbpaste | musicfinder extract
//! musicfinder samples list --filter pending
//! ```

mod auth;
mod downloads;
mod extract;
mod parse;
mod samples;
mod serve;

pub use auth::auth;
pub use downloads::{delete_download, list_downloads};
pub use extract::extract;
pub use parse::parse;
pub use samples::{
    NewSample, add_sample, download_sample, list_samples, lookup_sample, remove_sample,
};
pub use serve::serve;
