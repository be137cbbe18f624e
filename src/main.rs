//! tasm – two-pass assembler (CLI)

use anyhow::{Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

use tasm::{Assembler, Isa, Program, Radix};

/// CLI 옵션 정의
#[derive(Parser, Debug)]
#[command(author, version, about = "Two-pass assembler for the 4-byte-word machine")]
struct Cli {
    /// 입력 ASM 소스
    input: PathBuf,

    /// 출력 바이트 표기
    #[arg(short, long, value_enum, default_value_t = Radix::Hex)]
    format: Radix,

    /// 출력 파일 (기본 = stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    /* 1️⃣  소스 파일 읽기 */
    let src = fs::read_to_string(&cli.input)
        .with_context(|| format!("error opening file {}", cli.input.display()))?;

    /* 2️⃣  토큰화 + 1-패스 · 2-패스 */
    let isa = Isa::new();
    let program = Program::parse(&src)?;
    let listing = Assembler::new(&isa).assemble(&program)?;
    tracing::info!(bytes = listing.len(), "assembled {}", cli.input.display());

    /* 3️⃣  출력 */
    match &cli.output {
        Some(path) => fs::write(path, listing.render(cli.format))
            .with_context(|| format!("error writing {}", path.display()))?,
        None => print!("{}", listing.display(cli.format)),
    }
    Ok(())
}
