//! `repro-core` -- orchestration model for the reproduction driver.
//!
//! Everything the `repro` binary does is modeled here: the typed command
//! descriptor ([`command`]), the research-tree path layout ([`layout`]),
//! recipe steps and their exact argv shapes ([`recipe`]), the built-in
//! keyword catalog ([`catalog`]), training-time records ([`timing`]), and
//! the sequential executor with dry-run support ([`runner`]).

pub mod catalog;
pub mod command;
pub mod layout;
pub mod recipe;
pub mod runner;
pub mod timing;
