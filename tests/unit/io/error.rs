//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::path::PathBuf;
    use std::time::Duration;
    use tiletwist::PuzzleError;
    use tiletwist::io::error::{invalid_level, invalid_parameter};

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PuzzleError::FileSystem {
            path: "/tmp/level.json".into(),
            operation: "read level",
            source: io_error,
        };

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("read level"));
        assert!(message.contains("/tmp/level.json"));
        assert!(message.contains("file not found"));
    }

    // Tests JSON errors keep their parser details
    // Verified by dropping the source from the message
    #[test]
    fn test_level_format_error() {
        let json_error = serde_json::from_str::<u32>("{").unwrap_err();
        let error = PuzzleError::LevelFormat {
            path: PathBuf::from("broken.json"),
            source: json_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn test_certification_messages() {
        assert!(
            PuzzleError::NoSolution { explored: 17 }
                .to_string()
                .contains("17 states")
        );
        let timed_out = PuzzleError::TimedOut {
            explored: 5,
            elapsed: Duration::from_millis(1_500),
        };
        assert!(timed_out.to_string().contains("1500 ms"));

        let impossible = PuzzleError::Impossible {
            minimal_moves: 9,
            max_moves: 6,
        }
        .to_string();
        assert!(impossible.contains('9'));
        assert!(impossible.contains('6'));

        let failed = PuzzleError::GenerationFailed {
            attempts: 40,
            reason: "no route".to_string(),
        };
        assert!(failed.to_string().contains("40 attempts: no route"));
        assert!(failed.source().is_none());
    }

    // Tests only solved and over-budget levels count as repairable
    // Verified by adding NoSolution to the fixable set
    #[test]
    fn test_fixable_defects() {
        assert!(PuzzleError::AlreadySolved.is_fixable());
        assert!(
            PuzzleError::Impossible {
                minimal_moves: 4,
                max_moves: 3
            }
            .is_fixable()
        );
        assert!(!PuzzleError::NoSolution { explored: 1 }.is_fixable());
        assert!(!invalid_level("broken").is_fixable());
    }

    #[test]
    fn test_helper_constructors() {
        let error = invalid_parameter("cols", &2, &"must be between 3 and 64");
        let message = error.to_string();
        assert!(message.contains("cols"));
        assert!(message.contains("'2'"));
        assert!(message.contains("between 3 and 64"));

        assert_eq!(
            invalid_level("no goals").to_string(),
            "Invalid level: no goals"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let error: PuzzleError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(matches!(error, PuzzleError::FileSystem { .. }));
    }
}
