//! Textcue - plain text to timed captions
//!
//! Splits a document into sentences, groups them into caption cues, estimates
//! how long each cue stays on screen, wraps it into display lines, and renders
//! the result as SRT subtitles or an FCPXML title track.

pub mod caption;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod segment;
pub mod text;
pub mod workflow;
