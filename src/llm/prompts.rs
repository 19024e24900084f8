/// Name of the function the model is asked to call; also the schema title.
pub const FUNCTION_NAME: &str = "MeetingMinutes";

/// System instruction preceding the transcript.
pub const SYSTEM_PROMPT: &str = "Extract meeting minutes from the following transcript:";

/// Sampling temperature for extraction. Zero keeps repeated runs comparable.
pub const EXTRACTION_TEMPERATURE: f32 = 0.0;
