use std::{collections::HashMap, path::Path, str::FromStr};

use polyreg::{
    fit::{coefficient_table, rms_sweep},
    io::{format_table, read_json_file, read_table_file, TABLE_PRECISION},
    synthetic::{noisy_sine, DEFAULT_SIGMA, TEST_SEED, TRAINING_SEED},
    BayesianFit,
};

const USAGE: &str = "\
Usage: chapter_one <command> [key=value ...]

Commands:
  rms           Training and test E_RMS per degree
                [train=<file>] [test=<file>] [max_degree=9] [n_train=10] [n_test=100]
                [sigma=0.3] [seed=123456789] [train_seed=523456789]
  coefficients  Coefficients of one degree under several ridge strengths
                [train=<file>] [degree=9] [lambdas=0,0.000911882,1] [seed=523456789]
  bayes         Predictive mean and variance on a grid
                [train=<file>] [alpha=5e-3] [beta=11.1] [degree=9] [points=301] [from=0] [to=1]
  data          The noisy sine training set
                [n=10] [sigma=0.3] [seed=523456789]

Common options:
  out=<file>    Write the table to a file instead of stdout
  Training files ending in .json are read as JSON arrays of [x, t] pairs, anything else as
  whitespace-delimited two-column tables.";

type BoxResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    if command == "help" || command == "--help" || command == "-h" {
        println!("{USAGE}");
        std::process::exit(0);
    }

    let mut options = HashMap::new();
    for arg in args {
        let Some((key, value)) = arg.split_once('=') else {
            eprintln!("Expected key=value, got `{arg}`");
            std::process::exit(1);
        };
        options.insert(key.to_string(), value.to_string());
    }

    if let Err(e) = run(&command, &options) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run(command: &str, options: &HashMap<String, String>) -> BoxResult<()> {
    let table = match command {
        "rms" => rms(options)?,
        "coefficients" => coefficients(options)?,
        "bayes" => bayes(options)?,
        "data" => data(options)?,
        _ => return Err(format!("Unknown command `{command}`\n\n{USAGE}").into()),
    };

    match options.get("out") {
        Some(path) => std::fs::write(path, table)?,
        None => print!("{table}"),
    }
    Ok(())
}

fn rms(options: &HashMap<String, String>) -> BoxResult<String> {
    let sigma = option(options, "sigma", DEFAULT_SIGMA)?;
    let train = match options.get("train") {
        Some(path) => load(path)?,
        None => noisy_sine(
            option(options, "n_train", 10)?,
            sigma,
            option(options, "train_seed", TRAINING_SEED)?,
        )?,
    };
    let test = match options.get("test") {
        Some(path) => load(path)?,
        None => noisy_sine(
            option(options, "n_test", 100)?,
            sigma,
            option(options, "seed", TEST_SEED)?,
        )?,
    };

    let sweep = rms_sweep(&train, &test, option(options, "max_degree", 9)?)?;

    let mut out = String::from("# M E_train E_test\n");
    for row in sweep {
        out.push_str(&format!(
            "{} {:.p$} {:.p$}\n",
            row.degree,
            row.train,
            row.test,
            p = TABLE_PRECISION
        ));
    }
    Ok(out)
}

fn coefficients(options: &HashMap<String, String>) -> BoxResult<String> {
    let train = training_set(options)?;
    let degree = option(options, "degree", 9)?;
    let lambdas = match options.get("lambdas") {
        Some(list) => list
            .split(',')
            .map(|v| parse_value("lambdas", v.trim()))
            .collect::<BoxResult<Vec<f64>>>()?,
        None => vec![0.0, (-7.0f64).exp(), 1.0],
    };

    let table = coefficient_table(&train, degree, &lambdas)?;

    // One row per coefficient, one column per ridge strength
    let mut out = String::from("# j");
    for lambda in &lambdas {
        out.push_str(&format!(" lambda={lambda:e}"));
    }
    out.push('\n');
    for j in 0..=degree {
        out.push_str(&j.to_string());
        for column in &table {
            out.push_str(&format!(" {:.p$}", column[j], p = TABLE_PRECISION));
        }
        out.push('\n');
    }
    Ok(out)
}

fn bayes(options: &HashMap<String, String>) -> BoxResult<String> {
    let train = training_set(options)?;
    let fit = BayesianFit::new(
        &train,
        option(options, "alpha", 5e-3)?,
        option(options, "beta", 11.1)?,
        option(options, "degree", 9)?,
    )?;

    let predictions = fit.predict_linspace(
        option(options, "from", 0.0)?,
        option(options, "to", 1.0)?,
        option(options, "points", 301)?,
    );
    let rows = predictions.iter().map(polyreg::Prediction::row);
    Ok(format_table(rows, TABLE_PRECISION))
}

fn data(options: &HashMap<String, String>) -> BoxResult<String> {
    let data = noisy_sine(
        option(options, "n", 10)?,
        option(options, "sigma", DEFAULT_SIGMA)?,
        option(options, "seed", TRAINING_SEED)?,
    )?;

    // Same layout `train=` reads back
    Ok(format_table(data.iter().map(|&(x, t)| [x, t]), TABLE_PRECISION))
}

/// The `train=` file, or the standard noisy sine set.
fn training_set(options: &HashMap<String, String>) -> BoxResult<Vec<(f64, f64)>> {
    match options.get("train") {
        Some(path) => load(path),
        None => Ok(noisy_sine(
            10,
            DEFAULT_SIGMA,
            option(options, "seed", TRAINING_SEED)?,
        )?),
    }
}

fn load(path: &str) -> BoxResult<Vec<(f64, f64)>> {
    let path = Path::new(path);
    let data = match path.extension().and_then(|s| s.to_str()) {
        Some("json") => read_json_file(path)?,
        _ => read_table_file(path)?,
    };
    Ok(data)
}

fn option<T: FromStr>(options: &HashMap<String, String>, key: &str, default: T) -> BoxResult<T> {
    match options.get(key) {
        Some(value) => parse_value(key, value),
        None => Ok(default),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> BoxResult<T> {
    value
        .parse()
        .map_err(|_| format!("Invalid value for `{key}`: {value}").into())
}
