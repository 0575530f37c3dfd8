// Prints the binomial coefficient C(N, K).
//
//   choose stack-safe 50 100              # 100891344545564193334812497256
//   choose iterative 150 300 --width big
//   RUST_LOG=combine=debug choose recursive 5 10
use std::fmt::Display;

use combine::{pascal, CombinationError, Combine, Coefficient};
use num_bigint::BigUint;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy)]
enum Impl {
    StackSafe,
    Recursive,
    Iterative,
}

fn run<T: Coefficient>(implementation: Impl, k: u64, n: u64) -> Result<T, CombinationError> {
    match implementation {
        Impl::StackSafe => Combine::new().calc(k, n),
        Impl::Recursive => Combine::new().calc_recursive(k, n),
        Impl::Iterative => pascal::binomial(k, n),
    }
}

fn run_with<T>(implementation: Impl, k: u64, n: u64, stack_size: Option<usize>) -> String
where
    T: Coefficient + Display + Send + 'static,
{
    let res = match stack_size {
        None => run::<T>(implementation, k, n),
        Some(size) => {
            match combine::with_stack_size(size, move || run::<T>(implementation, k, n)) {
                Ok(res) => res,
                Err(_) => {
                    eprintln!("error: computation thread panicked");
                    std::process::exit(1);
                }
            }
        }
    };
    match res {
        Ok(val) => val.to_string(),
        Err(err) => {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }
    }
}

fn validate_u64_arg(arg: String) -> Result<(), String> {
    match arg.parse::<u64>() {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("expected non-negative integer")),
    }
}

fn validate_usize_arg(arg: String) -> Result<(), String> {
    match arg.parse::<usize>() {
        Ok(_) => Ok(()),
        Err(_) => Err(String::from("expected size in bytes")),
    }
}

fn main() {
    use clap::{value_t, App, Arg};

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("Binomial coefficient calculator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Computes C(N, K) by memoized recursion over Pascal's identity")
        .arg(
            Arg::with_name("IMPL")
                .help("implementation to use")
                .required(true)
                .possible_values(&["stack-safe", "recursive", "iterative"]),
        )
        .arg(
            Arg::with_name("K")
                .help("size of the chosen subset")
                .required(true)
                .validator(validate_u64_arg),
        )
        .arg(
            Arg::with_name("N")
                .help("size of the whole set")
                .required(true)
                .validator(validate_u64_arg),
        )
        .arg(
            Arg::with_name("width")
                .help("integer type to compute in")
                .short("w")
                .long("width")
                .takes_value(true)
                .possible_values(&["u64", "u128", "big"])
                .default_value("u128"),
        )
        .arg(
            Arg::with_name("stack-size")
                .help("run the computation on a thread with this many bytes of stack")
                .long("stack-size")
                .takes_value(true)
                .validator(validate_usize_arg),
        )
        .get_matches();

    let implementation = match matches.value_of("IMPL").unwrap() {
        "stack-safe" => Impl::StackSafe,
        "recursive" => Impl::Recursive,
        "iterative" => Impl::Iterative,
        _ => panic!("Impossible value for IMPL."),
    };
    let k = value_t!(matches.value_of("K"), u64).unwrap_or_else(|e| e.exit());
    let n = value_t!(matches.value_of("N"), u64).unwrap_or_else(|e| e.exit());
    let stack_size = if matches.is_present("stack-size") {
        Some(value_t!(matches, "stack-size", usize).unwrap_or_else(|e| e.exit()))
    } else {
        None
    };

    let output = match matches.value_of("width").unwrap() {
        "u64" => run_with::<u64>(implementation, k, n, stack_size),
        "u128" => run_with::<u128>(implementation, k, n, stack_size),
        "big" => run_with::<BigUint>(implementation, k, n, stack_size),
        _ => panic!("Impossible value for width."),
    };
    println!("{}", output);
}
