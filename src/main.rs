// Entry point: program main
// Handles --help, loads the records and runs the picker

use konf::config::Config;
use konf::prompt::{Picker, TerminalSelect, new_table_output_templates, terminal};
use konf::{logging, store};
use std::env;
use std::process;

fn print_help() {
    println!("konf - interactive kubeconfig context picker");
    println!();
    println!("Usage:");
    println!("  konf [options] <records.json|->");
    println!();
    println!("Options:");
    println!("  -a, --all            Show context, cluster and file columns and search across all of them.");
    println!("  -w, --max-width <n>  Maximum column width in --all mode (minimum 7). Default: 20.");
    println!("  -s, --size <n>       Number of rows shown at once. Default: 10.");
    println!("  -h, --help           Show this help message.");
    println!();
    println!("Records are a JSON array of {{\"context\", \"cluster\", \"file\"}} objects; use - to read stdin.");
    println!("The chosen context is printed to stdout.");
    println!();
    println!("Environment:");
    println!("  KONF_SHOW_ALL, KONF_MAX_COLUMN_LEN, KONF_PAGE_SIZE  defaults for the options above");
    println!("  KONF_LOG       tracing filter, e.g. debug");
    println!("  KONF_LOG_FILE  write logs to this file instead of stderr");
}

fn main() {
    let cfg = match Config::parse(env::args().skip(1), |k| env::var(k).ok()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("try 'konf --help'");
            process::exit(2);
        }
    };
    if cfg.help {
        print_help();
        return;
    }
    logging::init();

    let items = match store::load(&cfg.records_path) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    let templates = new_table_output_templates(cfg.max_column_len, cfg.show_all);
    let picker = Picker::new(items.clone(), templates.clone(), cfg.show_all, cfg.page_size);
    let mut prompt = TerminalSelect::new(picker);

    match terminal(&mut prompt).into_result() {
        Ok(idx) => match items.get(idx) {
            Some(item) => {
                eprintln!("{} {}", templates.style("green", "✔"), item.context);
                println!("{}", item.context);
            }
            None => {
                eprintln!("selected index {idx} is out of range");
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    }
}
