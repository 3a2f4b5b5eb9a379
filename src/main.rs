
extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod analyzer;

use analyzer::lexer::Token;
use analyzer::parser::Parser;
use analyzer::tree;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tTokens: {}\n\tOutfile: {}\n\tInput: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        args.is_present("tokens"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    let input = Path::new(args.value_of("INPUT").unwrap_or_default());
    let sources = match collect_sources(input) {
        Err(err) => {
            error!("fatal: unable to read input `{}`: {}", input.display(), err);
            std::process::exit(1);
        },
        Ok(sources) => sources,
    };

    if sources.is_empty() {
        error!("fatal: no .jack files found in `{}`", input.display());
        std::process::exit(1);
    }

    // An explicit output name only makes sense for a single unit.
    let explicit_output = match args.value_of("output") {
        Some(_) if sources.len() > 1 => {
            warn!("ignoring -o because `{}` holds {} source files", input.display(), sources.len());
            None
        },
        other => other.map(PathBuf::from),
    };

    let mut error_count: usize = 0;
    for source in sources.iter() {
        let opath = explicit_output.clone().unwrap_or_else(|| output_path(source, "X"));
        if let Err(e) = compile_unit(source, &opath, args.is_present("tokens"), args.is_present("print-debug")) {
            error_count += 1;
            error!("{}: {}", source.display(), e);
        }
    }

    if error_count > 0 {
        error!("Stopped analysis due to {} failed file(s).", error_count);
        std::process::exit(1);
    }
}

/// Analyzes one source file and writes its tree to `opath`.
fn compile_unit(ipath: &Path, opath: &Path, emit_tokens: bool, print_debug: bool) -> Result<(), String> {
    let ifile = File::open(ipath)
        .map_err(|err| format!("unable to open input file: {}", err))?;

    let tokens = analyzer::lexer::tokenize(Box::new(ifile)).map_err(|err| err.to_string())?;

    if print_debug {
        print_token_table(&tokens);
    }

    if emit_tokens {
        let tpath = output_path(ipath, "TX");
        write_output(&tpath, &tree::render_tokens(&tokens))?;
        info!("wrote tokens for `{}` to `{}`", ipath.display(), tpath.display());
    }

    let ast = Parser::new(&tokens).run().map_err(|err| err.to_string())?;
    debug!("`{}`: {} leaves under {} class member(s)", ipath.display(), ast.tokens().len(),
        ast.children().iter().filter(|n| n.label().is_some()).count());

    write_output(opath, &tree::render_xml(&ast))?;
    info!("wrote parse tree for `{}` to `{}`", ipath.display(), opath.display());
    Ok(())
}

fn write_output(opath: &Path, text: &str) -> Result<(), String> {
    let mut ofile = File::create(opath)
        .map_err(|err| format!("unable to open output file `{}`: {}", opath.display(), err))?;
    ofile.write_all(text.as_bytes())
        .map_err(|err| format!("unable to write to output file `{}`: {}", opath.display(), err))
}

/// A single file is taken as is; a directory yields its `.jack` files in name order.
fn collect_sources(input: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut sources = Vec::new();
    for entry in fs::read_dir(input)? {
        let path = entry?.path();
        if path.is_file() && path.extension().map_or(false, |ext| ext == "jack") {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// `dir/Main.jack` with suffix `X` becomes `dir/MainX.xml`.
fn output_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source.file_stem().map_or_else(|| "out".into(), |s| s.to_string_lossy());
    source.with_file_name(format!("{}{}.xml", stem, suffix))
}

fn print_token_table(tokens: &[Token]) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for (idx, tok) in tokens.iter().enumerate() {
        grid.add(Cell::from(format!("0x{:04X}:", idx)));
        grid.add(Cell::from(format!("line {}", tok.line)));
        grid.add(Cell::from(tok.kind.to_string()));
        grid.add(Cell::from(tok.lexeme.clone()));
    }

    println!("{}", grid.fit_into_columns(4));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(Arg::with_name("INPUT")
            .help("Sets the .jack file, or directory of .jack files, to analyze")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write the parse tree to an outfile (single file input only)"))
        .arg(Arg::with_name("tokens")
            .short("t")
            .takes_value(false)
            .help("also write the token listing next to each input"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the token table of each input to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}
