use carefinder_core::{Ownership, DEFAULT_LIMIT};
use clap::{Parser, Subcommand, ValueEnum};

/// CLI arguments for carefinder
#[derive(Debug, Parser)]
#[command(
    name = "carefinder",
    version,
    about = "Find hospitals, clinics, BHUs and RHCs in Khyber Pakhtunkhwa"
)]
pub struct CliArgs {
    /// Backend base URL (default: $CAREFINDER_API_BASE_URL or http://localhost:8000)
    #[arg(long = "api-url", global = true)]
    pub api_url: Option<String>,

    /// Log at debug level (RUST_LOG still wins when set)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List supported cities, optionally matching a substring
    Cities {
        /// Substring to search (case- and accent-insensitive)
        query: Option<String>,
    },

    /// Fetch facilities for one city and print them
    Facilities {
        /// City / town name (e.g. Peshawar)
        #[arg(short = 'c', long = "city")]
        city: String,

        /// Maximum number of results requested from the backend
        #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_LIMIT)]
        limit: u32,

        /// Only show facilities with this ownership
        #[arg(short = 'o', long = "ownership", value_enum)]
        ownership: Option<OwnershipArg>,

        /// Only facilities known to offer emergency services
        #[arg(long = "emergency")]
        emergency: bool,

        /// Only facilities known to be open 24/7
        #[arg(long = "open24")]
        open24: bool,

        /// Print the filtered records as JSON
        #[arg(long = "json", conflicts_with = "map")]
        json: bool,

        /// Print the map view (center + markers) instead of the list
        #[arg(long = "map")]
        map: bool,
    },

    /// Read city selections from stdin (one per line, blank line clears)
    /// and print every state change
    Watch {
        /// Maximum number of results requested from the backend
        #[arg(short = 'l', long = "limit", default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OwnershipArg {
    Government,
    Private,
}

impl From<OwnershipArg> for Ownership {
    fn from(o: OwnershipArg) -> Self {
        match o {
            OwnershipArg::Government => Ownership::Government,
            OwnershipArg::Private => Ownership::Private,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facilities_with_filters() {
        let args = CliArgs::try_parse_from([
            "carefinder",
            "--api-url",
            "http://backend:8000",
            "facilities",
            "--city",
            "Peshawar",
            "--limit",
            "50",
            "--ownership",
            "government",
            "--emergency",
        ])
        .unwrap();

        assert_eq!(args.api_url.as_deref(), Some("http://backend:8000"));
        match args.command {
            Commands::Facilities {
                city,
                limit,
                ownership,
                emergency,
                open24,
                json,
                map,
            } => {
                assert_eq!(city, "Peshawar");
                assert_eq!(limit, 50);
                assert_eq!(ownership, Some(OwnershipArg::Government));
                assert!(emergency);
                assert!(!open24 && !json && !map);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_limit_defaults_to_ui_default() {
        let args = CliArgs::try_parse_from(["carefinder", "facilities", "-c", "Swat"]).unwrap();
        assert!(matches!(
            args.command,
            Commands::Facilities { limit, .. } if limit == DEFAULT_LIMIT
        ));
    }

    #[test]
    fn test_json_and_map_conflict() {
        let res = CliArgs::try_parse_from([
            "carefinder", "facilities", "-c", "Swat", "--json", "--map",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_unknown_ownership_rejected() {
        let res = CliArgs::try_parse_from([
            "carefinder", "facilities", "-c", "Swat", "--ownership", "community",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = CliArgs::try_parse_from(["carefinder", "cities", "dera", "-v"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Commands::Cities { query: Some(ref q) } if q == "dera"));
    }
}
