// Proximal CLI — train an FTRL-Proximal model on line-format sparse data.
//
// Usage: proximal TRAIN [TEST] [options]
//
//   --alpha A          learning-rate scale        (default 0.01)
//   --gamma G          time-decay rate            (default 0.0005)
//   --l1 L             L1 strength                (default 1.0)
//   --l2 L             L2 strength                (default 1.0)
//   --bits B           slot space n = 2^B        (default 20)
//   --epoch E          passes over the data       (default 1)
//   --no-interaction   disable pairwise features
//   --out FILE         write TEST predictions here (default stdout)
//
// TRAIN and TEST are `target index:value index:value ...` text files, one
// example per line. Predictions are one probability per line, TEST order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::process::ExitCode;

use proximal_core::data::read_sparse_text;
use proximal_core::model::{FtrlConfig, FtrlModel};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {msg}");
            ExitCode::FAILURE
        }
    }
}

struct Args {
    config: FtrlConfig,
    train: String,
    test: Option<String>,
    out: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mut config = FtrlConfig::default();
    let mut positional = Vec::new();
    let mut out = None;

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "--alpha" => config.alpha = flag_value(&argv, &mut i)?.parse().map_err(bad(&argv, i))?,
            "--gamma" => config.gamma = flag_value(&argv, &mut i)?.parse().map_err(bad(&argv, i))?,
            "--l1" => config.l1 = flag_value(&argv, &mut i)?.parse().map_err(bad(&argv, i))?,
            "--l2" => config.l2 = flag_value(&argv, &mut i)?.parse().map_err(bad(&argv, i))?,
            "--bits" => {
                let bits: u32 = flag_value(&argv, &mut i)?.parse().map_err(bad(&argv, i))?;
                if bits >= usize::BITS {
                    return Err(format!("--bits {bits} is out of range"));
                }
                config.n = 1 << bits;
            }
            "--epoch" => config.epoch = flag_value(&argv, &mut i)?.parse().map_err(bad(&argv, i))?,
            "--no-interaction" => config.interaction = false,
            "--out" => out = Some(flag_value(&argv, &mut i)?.to_string()),
            flag if flag.starts_with("--") => return Err(format!("unknown flag {flag}")),
            _ => positional.push(argv[i].clone()),
        }
        i += 1;
    }

    let mut positional = positional.into_iter();
    let train = positional
        .next()
        .ok_or("usage: proximal TRAIN [TEST] [options]")?;
    let test = positional.next();
    if let Some(extra) = positional.next() {
        return Err(format!("unexpected argument {extra:?}"));
    }

    Ok(Args { config, train, test, out })
}

fn flag_value<'a>(argv: &'a [String], i: &mut usize) -> Result<&'a str, String> {
    let flag = argv[*i].clone();
    *i += 1;
    argv.get(*i)
        .map(|s| s.as_str())
        .ok_or_else(|| format!("{flag} needs a value"))
}

fn bad<E>(argv: &[String], i: usize) -> impl FnOnce(E) -> String + '_ {
    move |_| format!("bad value {:?} for {}", argv[i], argv[i - 1])
}

fn load(path: &str) -> Result<(proximal_core::data::SparseRows, Vec<f64>), String> {
    let file = File::open(path).map_err(|e| format!("{path}: {e}"))?;
    read_sparse_text(BufReader::new(file)).map_err(|e| format!("{path}: {e}"))
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let mut model = FtrlModel::new(args.config).map_err(|e| e.to_string())?;
    println!("{}", model.config);

    let (x, y) = load(&args.train)?;
    println!("train: {} rows, {} indices", x.rows(), x.nnz());

    let losses = model.fit(&x, &y).map_err(|e| e.to_string())?;
    for (epoch, loss) in losses.iter().enumerate() {
        println!("epoch {:>3}  logloss {loss:.6}", epoch + 1);
    }

    if let Some(test_path) = &args.test {
        let (tx, _ty) = load(test_path)?;
        let preds = model.predict(&tx).map_err(|e| e.to_string())?;
        match &args.out {
            Some(out_path) => {
                let file = File::create(out_path).map_err(|e| format!("{out_path}: {e}"))?;
                let mut w = BufWriter::new(file);
                for p in &preds {
                    writeln!(w, "{p:.9}").map_err(|e| format!("{out_path}: {e}"))?;
                }
                w.flush().map_err(|e| format!("{out_path}: {e}"))?;
                println!("test: {} rows -> {out_path}", tx.rows());
            }
            None => {
                let stdout = std::io::stdout();
                let mut w = BufWriter::new(stdout.lock());
                for p in &preds {
                    writeln!(w, "{p:.9}").map_err(|e| e.to_string())?;
                }
            }
        }
    }

    Ok(())
}
