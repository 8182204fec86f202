//! Single-token instruction parser.
//!
//! Pure functions: no I/O, no state. The position of `-` in the token
//! selects the range form, which is unambiguous because time strings never
//! contain `-` themselves.

use super::error::{InstructionError, InstructionResult};
use super::timecode::time_to_seconds;
use crate::models::ExtractionRequest;

/// Parse one instruction token against the source duration.
///
/// Dispatch, in priority order:
/// 1. no `-`: frame at `T`, valid if `T <= duration`
/// 2. leading `-`: clip `[0, E]`, valid if `0 < E <= duration`
/// 3. trailing `-`: clip `[S, duration]`, valid if `S < duration`
/// 4. one internal `-`: clip `[S, E]`, valid if `S < E <= duration`
/// 5. anything else is rejected
pub fn parse_instruction(token: &str, duration: f64) -> InstructionResult<ExtractionRequest> {
    let token = token.trim();
    if token.is_empty() {
        return Err(InstructionError::Empty);
    }

    if !token.contains('-') {
        let at = parse_bound(token)?;
        ensure_within(at, duration)?;
        return Ok(ExtractionRequest::frame(at));
    }

    if let Some(rest) = token.strip_prefix('-') {
        let end = parse_bound(rest)?;
        ensure_within(end, duration)?;
        if end <= 0.0 {
            return Err(InstructionError::EmptyRange { at: end });
        }
        return Ok(ExtractionRequest::clip(0.0, end));
    }

    if let Some(rest) = token.strip_suffix('-') {
        let start = parse_bound(rest)?;
        ensure_within(start, duration)?;
        if start >= duration {
            return Err(InstructionError::EmptyRange { at: start });
        }
        return Ok(ExtractionRequest::clip(start, duration));
    }

    let mut parts = token.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => {
            let start = parse_bound(start)?;
            let end = parse_bound(end)?;
            if start >= end {
                return Err(InstructionError::StartNotBeforeEnd { start, end });
            }
            ensure_within(end, duration)?;
            Ok(ExtractionRequest::clip(start, end))
        }
        _ => Err(InstructionError::malformed_range(token)),
    }
}

/// Parse one token, discarding the rejection reason.
///
/// `None` means the token is skipped; it is never a hard failure.
pub fn parse_clip_instruction(token: &str, duration: f64) -> Option<ExtractionRequest> {
    parse_instruction(token, duration).ok()
}

fn parse_bound(text: &str) -> InstructionResult<f64> {
    time_to_seconds(text)
        .map(|secs| secs as f64)
        .ok_or_else(|| InstructionError::invalid_time(text.trim()))
}

fn ensure_within(seconds: f64, duration: f64) -> InstructionResult<()> {
    if seconds > duration {
        return Err(InstructionError::ExceedsDuration { seconds, duration });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExtractionKind;

    const DURATION: f64 = 120.0;

    #[test]
    fn plain_time_is_frame() {
        let req = parse_instruction("90", DURATION).unwrap();
        assert_eq!(req, ExtractionRequest::frame(90.0));
        assert_eq!(req.kind, ExtractionKind::Frame);
    }

    #[test]
    fn frame_at_exact_duration_is_allowed() {
        assert_eq!(
            parse_instruction("2:00", DURATION),
            Ok(ExtractionRequest::frame(120.0))
        );
        assert_eq!(parse_instruction("0", DURATION), Ok(ExtractionRequest::frame(0.0)));
    }

    #[test]
    fn frame_past_duration_is_rejected() {
        assert_eq!(
            parse_instruction("2:01", DURATION),
            Err(InstructionError::ExceedsDuration {
                seconds: 121.0,
                duration: DURATION
            })
        );
    }

    #[test]
    fn leading_dash_clips_from_start() {
        assert_eq!(
            parse_instruction("-90", DURATION),
            Ok(ExtractionRequest::clip(0.0, 90.0))
        );
        assert_eq!(
            parse_instruction("-1:30", DURATION),
            Ok(ExtractionRequest::clip(0.0, 90.0))
        );
    }

    #[test]
    fn trailing_dash_clips_to_end() {
        assert_eq!(
            parse_instruction("90-", DURATION),
            Ok(ExtractionRequest::clip(90.0, 120.0))
        );
    }

    #[test]
    fn open_end_uses_fractional_duration() {
        assert_eq!(
            parse_instruction("10-", 95.5),
            Ok(ExtractionRequest::clip(10.0, 95.5))
        );
    }

    #[test]
    fn internal_dash_is_explicit_range() {
        assert_eq!(
            parse_instruction("30-90", DURATION),
            Ok(ExtractionRequest::clip(30.0, 90.0))
        );
        assert_eq!(
            parse_instruction("0:30 - 1:30", DURATION),
            Ok(ExtractionRequest::clip(30.0, 90.0))
        );
    }

    #[test]
    fn full_video_explicit_range_is_allowed() {
        assert_eq!(
            parse_instruction("0-120", DURATION),
            Ok(ExtractionRequest::clip(0.0, 120.0))
        );
    }

    #[test]
    fn reversed_range_is_rejected_regardless_of_duration() {
        for duration in [10.0, 120.0, 10_000.0] {
            assert!(matches!(
                parse_instruction("90-30", duration),
                Err(InstructionError::StartNotBeforeEnd { .. })
            ));
        }
        assert!(matches!(
            parse_instruction("30-30", DURATION),
            Err(InstructionError::StartNotBeforeEnd { .. })
        ));
    }

    #[test]
    fn range_past_duration_is_rejected() {
        assert!(matches!(
            parse_instruction("30-200", DURATION),
            Err(InstructionError::ExceedsDuration { .. })
        ));
        assert!(matches!(
            parse_instruction("-200", DURATION),
            Err(InstructionError::ExceedsDuration { .. })
        ));
        assert!(matches!(
            parse_instruction("200-", DURATION),
            Err(InstructionError::ExceedsDuration { .. })
        ));
    }

    #[test]
    fn zero_length_open_ranges_are_rejected() {
        assert_eq!(
            parse_instruction("-0", DURATION),
            Err(InstructionError::EmptyRange { at: 0.0 })
        );
        assert_eq!(
            parse_instruction("2:00-", DURATION),
            Err(InstructionError::EmptyRange { at: 120.0 })
        );
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        assert_eq!(parse_instruction("   ", DURATION), Err(InstructionError::Empty));
        assert!(matches!(
            parse_instruction("bogus", DURATION),
            Err(InstructionError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse_instruction("-", DURATION),
            Err(InstructionError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse_instruction("--30", DURATION),
            Err(InstructionError::InvalidTime { .. })
        ));
        assert!(matches!(
            parse_instruction("10-20-30", DURATION),
            Err(InstructionError::MalformedRange { .. })
        ));
        assert!(matches!(
            parse_instruction("1:2:3:4", DURATION),
            Err(InstructionError::InvalidTime { .. })
        ));
    }

    #[test]
    fn parsing_is_idempotent() {
        for token in ["90", "-90", "90-", "30-90", "90-30", "bogus", "10-20-30"] {
            assert_eq!(
                parse_instruction(token, DURATION),
                parse_instruction(token, DURATION)
            );
        }
    }

    #[test]
    fn option_form_matches_result_form() {
        assert_eq!(
            parse_clip_instruction("30-90", DURATION),
            Some(ExtractionRequest::clip(30.0, 90.0))
        );
        assert_eq!(parse_clip_instruction("90-30", DURATION), None);
    }
}
