use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use num_bigint::BigInt;
use tuid::{NanoClockConfig, Tuid, i62::DEFAULT_I64_LEN};

/// Smallest and largest `kind` that survive the two-digit field unchanged.
const MIN_KIND: i32 = -1_922;
const MAX_KIND: i32 = 1_921;

/// Command-line arguments for the `tuid` binary.
///
/// Options that tune generation can also be set through environment
/// variables or a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "tuid",
    version,
    about = "Generate, inspect and encode time-sortable unique identifiers"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate identifiers, one per line.
    Generate {
        /// Identifier type stamped into the last field.
        ///
        /// Environment variable: `TUID_TYPE`
        #[arg(
            short = 't',
            long = "type",
            env = "TUID_TYPE",
            default_value_t = 0,
            allow_negative_numbers = true
        )]
        kind: i32,

        /// Number of identifiers to generate.
        ///
        /// Environment variable: `TUID_COUNT`
        #[arg(short = 'n', long, env = "TUID_COUNT", default_value_t = 1)]
        count: usize,

        /// Calibration probes per clock synchronization. The probe with the
        /// least jitter is kept.
        ///
        /// Environment variable: `TUID_PROBES`
        #[arg(long, env = "TUID_PROBES", default_value_t = 5)]
        probes: usize,
    },

    /// Print the fields of an identifier.
    Inspect {
        /// A 28-character identifier.
        tuid: String,
    },

    /// Encode an integer as fixed-width I62 text.
    Encode {
        /// Decimal integer of any size.
        #[arg(allow_negative_numbers = true)]
        value: String,

        /// Output width in digits.
        #[arg(short, long, default_value_t = DEFAULT_I64_LEN)]
        len: usize,
    },

    /// Decode I62 text back to a decimal integer.
    Decode {
        /// I62 text over `[0-9A-Za-z]`.
        text: String,

        /// Read the text as an unsigned magnitude instead of a signed value.
        #[arg(short, long, default_value_t = false)]
        unsigned: bool,
    },
}

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        kind: i32,
        count: usize,
        clock: NanoClockConfig,
    },
    Inspect(Tuid),
    Encode {
        value: BigInt,
        len: usize,
    },
    Decode {
        text: String,
        unsigned: bool,
    },
}

impl TryFrom<CliArgs> for Action {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        match args.command {
            Command::Generate {
                kind,
                count,
                probes,
            } => {
                if !(MIN_KIND..=MAX_KIND).contains(&kind) {
                    bail!("TUID_TYPE ({kind}) must be within {MIN_KIND}..={MAX_KIND}");
                }
                if count == 0 {
                    bail!("TUID_COUNT must be greater than 0");
                }
                if probes == 0 {
                    bail!("TUID_PROBES must be greater than 0");
                }
                Ok(Self::Generate {
                    kind,
                    count,
                    clock: NanoClockConfig {
                        probes,
                        ..NanoClockConfig::default()
                    },
                })
            }
            Command::Inspect { tuid } => {
                let id = Tuid::parse(&tuid).with_context(|| format!("invalid tuid {tuid:?}"))?;
                Ok(Self::Inspect(id))
            }
            Command::Encode { value, len } => {
                let value = value
                    .parse::<BigInt>()
                    .with_context(|| format!("{value:?} is not a decimal integer"))?;
                Ok(Self::Encode { value, len })
            }
            Command::Decode { text, unsigned } => Ok(Self::Decode { text, unsigned }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(argv: &[&str]) -> anyhow::Result<Action> {
        let args = CliArgs::try_parse_from(argv)?;
        Action::try_from(args)
    }

    #[test]
    fn generate_takes_flags() {
        let parsed = action(&[
            "tuid", "generate", "--type", "-7", "-n", "3", "--probes", "2",
        ])
        .unwrap();
        assert_eq!(
            parsed,
            Action::Generate {
                kind: -7,
                count: 3,
                clock: NanoClockConfig {
                    probes: 2,
                    ..NanoClockConfig::default()
                },
            }
        );
    }

    #[test]
    fn generate_rejects_out_of_range_kind() {
        assert!(action(&["tuid", "generate", "--type", "1922"]).is_err());
        assert!(action(&["tuid", "generate", "--type", "-1923"]).is_err());
        assert!(action(&["tuid", "generate", "--type", "1921"]).is_ok());
    }

    #[test]
    fn generate_rejects_zero_count_and_probes() {
        assert!(action(&["tuid", "generate", "--count", "0"]).is_err());
        assert!(action(&["tuid", "generate", "--probes", "0"]).is_err());
    }

    #[test]
    fn inspect_validates_the_identifier() {
        let parsed = action(&["tuid", "inspect", "1hsn5f08M0kXzzzyta00089Rzy07"]).unwrap();
        assert_eq!(
            parsed,
            Action::Inspect(Tuid::parse("1hsn5f08M0kXzzzyta00089Rzy07").unwrap())
        );
        assert!(action(&["tuid", "inspect", "1hsn5f08M0kXzzzyta00089Rzy0"]).is_err());
        assert!(action(&["tuid", "inspect", "1hsn5f08M0kXzzzyta00089Rzy0_"]).is_err());
    }

    #[test]
    fn encode_accepts_big_and_negative_values() {
        let parsed = action(&[
            "tuid",
            "encode",
            "-170141183460469231731687303715884105728",
            "--len",
            "22",
        ])
        .unwrap();
        assert_eq!(
            parsed,
            Action::Encode {
                value: BigInt::from(i128::MIN),
                len: 22,
            }
        );
        assert!(action(&["tuid", "encode", "12x"]).is_err());
    }

    #[test]
    fn encode_defaults_to_i64_width() {
        let parsed = action(&["tuid", "encode", "42"]).unwrap();
        assert_eq!(
            parsed,
            Action::Encode {
                value: BigInt::from(42),
                len: DEFAULT_I64_LEN,
            }
        );
    }

    #[test]
    fn decode_is_signed_unless_asked() {
        assert_eq!(
            action(&["tuid", "decode", "V0"]).unwrap(),
            Action::Decode {
                text: "V0".into(),
                unsigned: false,
            }
        );
        assert_eq!(
            action(&["tuid", "decode", "-u", "V0"]).unwrap(),
            Action::Decode {
                text: "V0".into(),
                unsigned: true,
            }
        );
    }
}
