/*!
 * Scheduling Algorithm Types
 * Domain types for ready-queue ordering policies
 */

use crate::core::errors::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling algorithm selecting how the ready queue is ordered
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Algorithm {
    /// First come, first served
    #[default]
    Fcfs,
    /// Shortest job first (by total instructions)
    Sjf,
    /// Shortest remaining time first
    Srtf,
    /// Round-robin with a fixed quantum, preempted by the dispatcher
    RoundRobin,
    /// Static priority (lower value runs first)
    Priority,
    /// Multi-level feedback queue placeholder, ordered like FCFS
    Mlfq,
    /// Highest response ratio next
    Hrrn,
}

impl Algorithm {
    /// Every algorithm, in menu order
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
        Algorithm::Mlfq,
        Algorithm::Hrrn,
    ];

    /// Enum name used in persisted configuration
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf => "SJF",
            Self::Srtf => "SRTF",
            Self::RoundRobin => "RR",
            Self::Priority => "PRIORITY",
            Self::Mlfq => "MLFQ",
            Self::Hrrn => "HRRN",
        }
    }

    /// Whether the dispatcher preempts on quantum expiry
    #[inline]
    pub const fn is_time_sliced(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fcfs" | "fifo" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srtf" => Ok(Self::Srtf),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "priority" | "prio" => Ok(Self::Priority),
            "mlfq" => Ok(Self::Mlfq),
            "hrrn" => Ok(Self::Hrrn),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Algorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Algorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enum_names() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("round_robin".parse::<Algorithm>().unwrap(), Algorithm::RoundRobin);
        assert_eq!(" Prio ".parse::<Algorithm>().unwrap(), Algorithm::Priority);
        assert_eq!("hrrn".parse::<Algorithm>().unwrap(), Algorithm::Hrrn);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "lottery".parse::<Algorithm>(),
            Err(ConfigError::UnknownAlgorithm("lottery".into()))
        );
    }

    #[test]
    fn test_serde_uses_enum_name() {
        let json = serde_json::to_string(&Algorithm::RoundRobin).unwrap();
        assert_eq!(json, "\"RR\"");
        let back: Algorithm = serde_json::from_str("\"SRTF\"").unwrap();
        assert_eq!(back, Algorithm::Srtf);
        assert!(serde_json::from_str::<Algorithm>("\"EDF\"").is_err());
    }

    #[test]
    fn test_only_round_robin_is_time_sliced() {
        let sliced: Vec<_> = Algorithm::ALL
            .iter()
            .filter(|a| a.is_time_sliced())
            .collect();
        assert_eq!(sliced, vec![&Algorithm::RoundRobin]);
    }
}
