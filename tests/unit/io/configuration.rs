//! Tests for algorithm constants and CLI defaults

#[cfg(test)]
mod tests {
    use tiletwist::io::configuration::{
        CERTIFICATION_BUDGET_FACTOR, DEFAULT_COMPRESSION_INTERVAL, DEFAULT_DECOY_COUNT,
        DEFAULT_GRID_SIZE, DEFAULT_NODE_COUNT, DEFAULT_SEED, LEVEL_EXTENSION,
        MAX_GRID_DIMENSION, MAX_INDIVIDUAL_PROGRESS_BARS, MIN_GOAL_SEPARATION,
        MIN_GRID_DIMENSION, MOVE_SLACK, TIME_CHECK_INTERVAL,
    };

    // Tests the clock is read every thousand expansions
    // Verified by changing the interval
    #[test]
    fn test_time_check_interval() {
        assert_eq!(TIME_CHECK_INTERVAL, 1_000);
    }

    // Tests certification searches past the nominal budget
    // Verified by setting the factor to one
    #[test]
    fn test_certification_headroom() {
        assert_eq!(CERTIFICATION_BUDGET_FACTOR, 2);
        assert_eq!(MOVE_SLACK, 2);
    }

    #[test]
    fn test_grid_dimension_range() {
        assert!(MIN_GRID_DIMENSION < MAX_GRID_DIMENSION);
        assert!((MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&DEFAULT_GRID_SIZE));
        assert!(MIN_GOAL_SEPARATION >= 2);
    }

    // Tests the default generator parameters pass validation
    // Verified by raising the decoy default past the free cells
    #[test]
    fn test_generator_defaults_fit_default_grid() {
        let cells = DEFAULT_GRID_SIZE * DEFAULT_GRID_SIZE;
        assert!(DEFAULT_NODE_COUNT >= 2);
        assert!(DEFAULT_NODE_COUNT <= cells / 4);
        assert!(DEFAULT_DECOY_COUNT <= cells - DEFAULT_NODE_COUNT);
    }

    #[test]
    fn test_fixed_defaults() {
        assert_eq!(DEFAULT_SEED, 42);
        assert_eq!(MAX_INDIVIDUAL_PROGRESS_BARS, 5);
        assert!(DEFAULT_COMPRESSION_INTERVAL > 0);
    }

    // Tests level files are plain JSON
    // Verified by adding a leading dot
    #[test]
    fn test_level_extension() {
        assert_eq!(LEVEL_EXTENSION, "json");
        assert!(!LEVEL_EXTENSION.starts_with('.'));
    }
}
