mod hex;
mod validate;

use clap::{value_t, App, Arg, ArgMatches};

use takum::{classify, decode, encode, unpack, Class, Config};

// ----------------------------------------------------------------

const VERSION: &str = env!("CARGO_PKG_VERSION");

const EXAMPLES: &str = "EXAMPLES:
    takum-tool --test-all
    takum-tool --encode 3.14159 --bits 16
    takum-tool --decode 0x4D28 --bits 16";

fn main() {
    env_logger::init();

    let mut app = App::new("takum-tool")
        .version(VERSION)
        .about("Encodes, decodes, and validates logarithmic takums")
        .after_help(EXAMPLES)
        .arg(
            Arg::with_name("test_all")
                .long("test-all")
                .help("Run all validation tests at every width"),
        )
        .arg(
            Arg::with_name("test_encoding")
                .long("test-encoding")
                .help("Run the round-trip tests at the chosen width"),
        )
        .arg(
            Arg::with_name("test_constants")
                .long("test-constants")
                .help("Show known mathematical constants as 16-bit takums"),
        )
        .arg(
            Arg::with_name("encode")
                .long("encode")
                .value_name("VALUE")
                .help("Encode a float value to takum")
                .takes_value(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::with_name("decode")
                .long("decode")
                .value_name("HEX")
                .help("Decode a hex takum value to float")
                .takes_value(true)
                .allow_hyphen_values(true),
        )
        .arg(
            Arg::with_name("bits")
                .long("bits")
                .value_name("N")
                .help("Takum bit width")
                .takes_value(true)
                .possible_values(&["8", "16", "32", "64"])
                .default_value("16"),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .help("Also print the individual fields of encoded values"),
        );
    let args = app.clone().get_matches();

    let code = run(&args, &mut app);
    std::process::exit(code);
}

fn run(args: &ArgMatches, app: &mut App) -> i32 {
    let bits = value_t!(args, "bits", u32).unwrap_or_else(|e| e.exit());
    let config = match takum::resolve(bits) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let verbose = args.is_present("verbose");

    if args.is_present("test_all") {
        let passed = validate::run_all(true);
        println!("\n{}", "=".repeat(60));
        return if passed {
            println!("ALL TESTS PASSED ✓");
            0
        } else {
            println!("SOME TESTS FAILED ✗");
            1
        };
    }

    if args.is_present("test_encoding") {
        return if validate::round_trip(&config, true) { 0 } else { 1 };
    }

    if args.is_present("test_constants") {
        return if validate::constants() { 0 } else { 1 };
    }

    if args.is_present("encode") {
        let value = value_t!(args, "encode", f64).unwrap_or_else(|e| e.exit());
        let encoded = encode(value, &config);
        println!("Encoding {:?} as takum{}:", value, config.bits);
        println!("  Hex: {}", hex::format(encoded, config.width));
        println!("  Int: {}", encoded);
        println!("  Decoded: {:?}", decode(encoded, &config));
        if verbose {
            print_fields(encoded, &config);
        }
        return 0;
    }

    if let Some(text) = args.value_of("decode") {
        let encoded = match hex::parse(text, config.width) {
            Ok(encoded) => encoded,
            Err(e) => {
                eprintln!("Error: Invalid hex value '{}': {}", text, e);
                return 1;
            }
        };

        let decoded = decode(encoded, &config);
        println!("Decoding {} as takum{}:", text, config.bits);
        if decoded.is_nan() {
            println!("  Value: NaR (Not a Real)");
        } else {
            println!("  Value: {:?}", decoded);
        }
        if verbose {
            print_fields(encoded, &config);
        }
        return 0;
    }

    // Nothing to do.
    if let Err(e) = app.print_help() {
        eprintln!("Error: {}", e);
        return 1;
    }
    println!();
    0
}

fn print_fields(encoded: i64, config: &Config) {
    if classify(encoded, config) != Class::Finite {
        return;
    }

    let f = unpack(encoded, config);
    println!("  Fields:");
    println!("    sign:           {}", f.sign as u8);
    println!("    direction:      {}", f.direction as u8);
    println!("    regime:         {}", f.regime);
    println!(
        "    characteristic: {} ({} bits)",
        field_bits(f.characteristic, f.characteristic_bits),
        f.characteristic_bits
    );
    println!(
        "    mantissa:       {} ({} bits)",
        field_bits(f.mantissa, f.mantissa_bits),
        f.mantissa_bits
    );
    println!("    log_sqrt(e):    {:?}", f.log());
}

/// A field in binary, zero-padded to its width.  Empty fields print as `-`.
fn field_bits(value: u64, bits: u32) -> String {
    if bits == 0 {
        return "-".to_string();
    }
    format!("{:0width$b}", value, width = bits as usize)
}
