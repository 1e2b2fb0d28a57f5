//! Collaborator payload loading.
//!
//! The video-indexing service hands over a transcript (and, when its
//! visual analysis ran, a visual-description track); the caller may add
//! presentation context. All three arrive as JSON files. Timestamp fields
//! accept numbers or `HH:MM:SS` strings, matching what the service emits.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use plens_models::{PresentationContext, Transcript, Utterance, VideoId, VisualContext};

use crate::error::{WorkerError, WorkerResult};

/// On-disk transcript payload.
#[derive(Debug, Deserialize)]
struct TranscriptFile {
    #[serde(default)]
    video_id: Option<String>,
    utterances: Vec<Utterance>,
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, name: &str) -> WorkerResult<T> {
    if !path.exists() {
        return Err(WorkerError::missing_input(format!(
            "{} not found at {}",
            name,
            path.display()
        )));
    }
    let raw = std::fs::read_to_string(path).map_err(|source| WorkerError::ReadFailed {
        name: name.to_string(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| WorkerError::ParseFailed {
        name: name.to_string(),
        source,
    })
}

/// Load the transcript payload. The video id falls back to the file stem
/// when the payload omits it.
pub fn load_transcript(path: &Path) -> WorkerResult<Transcript> {
    let file: TranscriptFile = read_json(path, "transcript")?;

    let video_id = file
        .video_id
        .map(VideoId::from)
        .or_else(|| {
            path.file_stem()
                .and_then(|s| s.to_str())
                .map(VideoId::from)
        })
        .unwrap_or_default();

    let utterances: Vec<Utterance> = file.utterances;
    info!(
        video_id = %video_id,
        utterances = utterances.len(),
        "Loaded transcript"
    );

    Ok(Transcript::new(video_id, utterances))
}

/// Load the visual-context payload, if the caller provided one.
pub fn load_visual_context(path: &Path) -> WorkerResult<VisualContext> {
    let context: VisualContext = read_json(path, "visual context")?;
    info!(moments = context.moments.len(), "Loaded visual context");
    Ok(context)
}

/// Load the presentation-context payload, if the caller provided one.
pub fn load_presentation_context(path: &Path) -> WorkerResult<PresentationContext> {
    read_json(path, "presentation context")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_transcript() {
        let file = write_temp(
            r#"{
                "video_id": "vid-42",
                "utterances": [
                    {"start_sec": 0, "end_sec": 5.5, "text": "hello  there"},
                    {"start_sec": "00:00:05.500", "end_sec": "00:00:10", "text": "again"}
                ]
            }"#,
        );

        let transcript = load_transcript(file.path()).unwrap();
        assert_eq!(transcript.video_id.as_str(), "vid-42");
        assert_eq!(transcript.utterances.len(), 2);
        assert_eq!(transcript.utterances[1].start_sec, 5.5);
        // ingestion normalization collapsed the doubled space
        assert_eq!(transcript.utterances[0].text, "hello there");
    }

    #[test]
    fn test_video_id_falls_back_to_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo-video.json");
        std::fs::write(&path, r#"{"utterances": []}"#).unwrap();

        let transcript = load_transcript(&path).unwrap();
        assert_eq!(transcript.video_id.as_str(), "demo-video");
    }

    #[test]
    fn test_missing_transcript_names_the_input() {
        let err = load_transcript(Path::new("/nonexistent/transcript.json")).unwrap_err();
        assert!(matches!(err, WorkerError::MissingInput(_)));
        assert!(err.to_string().contains("transcript"));
    }

    #[test]
    fn test_malformed_transcript_is_a_parse_error() {
        let file = write_temp("{not json");
        let err = load_transcript(file.path()).unwrap_err();
        assert!(matches!(err, WorkerError::ParseFailed { .. }));
    }

    #[test]
    fn test_load_visual_context() {
        let file = write_temp(
            r#"[
                {"start_sec": 0, "end_sec": 8, "description": "title slide"},
                {"start_sec": 8, "end_sec": 20, "description": "latency chart"}
            ]"#,
        );

        let context = load_visual_context(file.path()).unwrap();
        assert_eq!(context.moments.len(), 2);
        assert_eq!(
            context.descriptions_in_range(10.0, 15.0),
            vec!["latency chart"]
        );
    }

    #[test]
    fn test_load_presentation_context() {
        let file = write_temp(r#"{"audience": "judges", "time_limit": "3 minutes"}"#);
        let context = load_presentation_context(file.path()).unwrap();
        assert_eq!(context.audience.as_deref(), Some("judges"));
        assert!(context.mode.is_none());
    }
}
