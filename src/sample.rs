//! Bundled demonstration transcript
//!
//! A county commission meeting covering agenda approval, motions with
//! amendments, a roll-call vote and announcements. Source:
//! <https://www.ctas.tennessee.edu/eli/sample-meeting-transcript>

pub const SAMPLE_TRANSCRIPT: &str = include_str!("../assets/sample_transcript.txt");
