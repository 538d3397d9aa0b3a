use std::fmt;
use std::str::FromStr;

use crate::error::CorridorError;

/// Declares a query mode enum with its string vocabulary.
macro_rules! query_mode {
    ($(#[$meta:meta])* $name:ident, $kind:literal { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// The mode's canonical string.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $name {
            type Err = CorridorError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(CorridorError::UnsupportedMode {
                        kind: $kind,
                        mode: other.to_owned(),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

query_mode!(
    /// Aggregation of an N points × M corridors query.
    BatchMode, "batch" {
        Matrix => "matrix",
        Summary => "summary",
        ByPoint => "by_point",
        ByBuffer => "by_buffer",
        Detailed => "detailed",
    }
);

query_mode!(
    /// Aggregation of one point against many corridors.
    CorridorSetMode, "corridor set" {
        Any => "any",
        All => "all",
        Count => "count",
        Which => "which",
        Details => "details",
    }
);

query_mode!(
    /// Aggregation of many points against one corridor.
    PointSetMode, "point set" {
        Contains => "contains",
        Any => "any",
        All => "all",
        Count => "count",
        Which => "which",
        Details => "details",
    }
);

query_mode!(
    /// Tier of a centerline comparison.
    CompareMode, "comparison" {
        Basic => "basic",
        Detailed => "detailed",
        Geometric => "geometric",
    }
);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_modes() {
        assert_eq!("by_buffer".parse::<BatchMode>().unwrap(), BatchMode::ByBuffer);
        assert_eq!("which".parse::<CorridorSetMode>().unwrap(), CorridorSetMode::Which);
        assert_eq!("contains".parse::<PointSetMode>().unwrap(), PointSetMode::Contains);
        assert_eq!("geometric".parse::<CompareMode>().unwrap(), CompareMode::Geometric);
    }

    #[test]
    fn unknown_mode_fails_fast() {
        let err = "everything".parse::<BatchMode>().unwrap_err();
        assert!(matches!(
            err,
            CorridorError::UnsupportedMode { kind: "batch", ref mode } if mode == "everything"
        ));
        // Point-set vocabulary is not shared with the corridor-set one.
        assert!("contains".parse::<CorridorSetMode>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for mode in [BatchMode::Matrix, BatchMode::Summary, BatchMode::Detailed] {
            assert_eq!(mode.to_string().parse::<BatchMode>().unwrap(), mode);
        }
    }
}
