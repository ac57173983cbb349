use crate::image::resampler::ResamplingPolicy;
use crate::Arguments;
use clap::{
    arg, builder::PossibleValue, crate_authors, crate_description, crate_name, crate_version,
    value_parser, Arg, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_file_argument(command);
        let command = Self::register_output_width_argument(command);
        let command = Self::register_output_height_argument(command);
        let command = Self::register_bits_per_channel_argument(command);
        Self::register_resampler_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_file_argument(command: Command) -> Command {
        command.arg(Self::create_output_file_argument())
    }

    fn register_output_width_argument(command: Command) -> Command {
        command.arg(Self::create_output_width_argument())
    }

    fn register_output_height_argument(command: Command) -> Command {
        command.arg(Self::create_output_height_argument())
    }

    fn register_bits_per_channel_argument(command: Command) -> Command {
        command.arg(Self::create_bits_per_channel_argument())
    }

    fn register_resampler_argument(command: Command) -> Command {
        command.arg(Self::create_resampler_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to 24-bit BMP input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_file_argument() -> Arg {
        arg!(output_file: -o --output_file <FILE> "Path to MIF output file")
            .required(false)
            .value_parser(value_parser!(PathBuf))
    }

    fn create_output_width_argument() -> Arg {
        arg!(output_width: --width <COLS> "Target memory width in cells")
            .default_value("60")
            .value_parser(value_parser!(u32).range(1..=4096))
    }

    fn create_output_height_argument() -> Arg {
        arg!(output_height: --height <ROWS> "Target memory height in cells")
            .default_value("60")
            .value_parser(value_parser!(u32).range(1..=4096))
    }

    fn create_bits_per_channel_argument() -> Arg {
        arg!(bits_per_channel: -b --bits_per_channel <BITS> "Bits per color channel")
            .default_value("3")
            .value_parser([
                PossibleValue::new("1"),
                PossibleValue::new("2"),
                PossibleValue::new("3"),
            ])
    }

    fn create_resampler_argument() -> Arg {
        arg!(resampler: -r --resampler <POLICY> "Resampling policy")
            .default_value("point")
            .value_parser(value_parser!(ResamplingPolicy))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_file: Self::extract_output_file_argument(matches),
            output_width: Self::extract_output_width_argument(matches),
            output_height: Self::extract_output_height_argument(matches),
            bits_per_channel: Self::extract_bits_per_channel_argument(matches),
            resampling_policy: Self::extract_resampler_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_file_argument(matches: &ArgMatches) -> Option<PathBuf> {
        matches.get_one::<PathBuf>("output_file").cloned()
    }

    fn extract_output_width_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("output_width")
            .expect("Output width must be provided, but was unset.")
            .to_owned()
    }

    fn extract_output_height_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("output_height")
            .expect("Output height must be provided, but was unset.")
            .to_owned()
    }

    fn extract_bits_per_channel_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<String>("bits_per_channel")
            .expect("Bits per channel must be provided, but was unset.")
            .parse::<u8>()
            .expect("Argument value for bits per channel must be in range of u8")
    }

    fn extract_resampler_argument(matches: &ArgMatches) -> ResamplingPolicy {
        matches
            .get_one::<ResamplingPolicy>("resampler")
            .expect("Resampling policy must be provided, but was unset.")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}
