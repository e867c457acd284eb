// ==========================================
// ACR 调校提取工具 - 命令行入口
// ==========================================
// 用法: acr-setup-extract [OPTIONS] <INPUTS>...
//       acr-setup-extract [OPTIONS] lookup <CAR> <STAGE>
// 退出码: 仅 I/O 或配置错误时非零，跳过的车辆不影响退出码
// ==========================================

use acr_setup_extract::config::{env_keys, ConfigManager};
use acr_setup_extract::engine::ExtractionOrchestrator;
use acr_setup_extract::importer::collect_content_files;
use acr_setup_extract::report::{render_table, ReportFormat, ReportWriter};
use acr_setup_extract::{logging, ExtractConfigReader, SetupCatalog};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 输出格式参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Json,
    Table,
    Tsv,
    All,
}

/// ACR 车辆调校提取
#[derive(Parser, Debug)]
#[command(name = "acr-setup-extract")]
#[command(about = "Extract per-surface car setups from Assetto Corsa Rally content exports")]
#[command(version)]
#[command(subcommand_negates_reqs = true)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// 单车内容 JSON 文件或目录（目录下 *.json，不递归）
    #[arg(required = true, value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// 配置文件路径（必须存在）
    #[arg(long, value_name = "FILE", env = env_keys::CONFIG_PATH)]
    config: Option<PathBuf>,

    /// 报告输出目录（覆盖配置与环境变量）
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// 输出格式（可重复，默认 all）
    #[arg(long = "format", value_enum)]
    formats: Vec<FormatArg>,

    /// 将文本表打印到标准输出（不写 .txt 文件）
    #[arg(long)]
    stdout: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 按车辆与赛段查询已导出的调校
    Lookup {
        car: String,
        stage: String,

        /// 调校表与 cars.tsv / stages.tsv 所在目录（默认为输出目录）
        #[arg(long, value_name = "DIR")]
        data_dir: Option<PathBuf>,
    },
}

impl Args {
    fn report_formats(&self) -> Vec<ReportFormat> {
        let mut selected = BTreeSet::new();
        if self.formats.is_empty() || self.formats.contains(&FormatArg::All) {
            selected.extend(ReportFormat::ALL);
        } else {
            for format in &self.formats {
                match format {
                    FormatArg::Json => selected.insert(ReportFormat::Json),
                    FormatArg::Table => selected.insert(ReportFormat::Table),
                    FormatArg::Tsv => selected.insert(ReportFormat::Tsv),
                    FormatArg::All => false,
                };
            }
        }

        if self.stdout {
            selected.remove(&ReportFormat::Table);
        }
        selected.into_iter().collect()
    }
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    // ==========================================
    // 配置: 默认值 → 配置文件 → 环境变量 → 命令行
    // ==========================================
    let mut config = ConfigManager::load(args.config.as_deref()).context("加载配置失败")?;
    if let Some(dir) = &args.output_dir {
        config.set_output_dir(dir);
    }
    config.validate().context("配置校验失败")?;

    if let Some(Command::Lookup {
        car,
        stage,
        data_dir,
    }) = &args.command
    {
        let dir = data_dir.as_deref().unwrap_or_else(|| config.output_dir());
        print!("{}", lookup(dir, car, stage)?);
        return Ok(());
    }

    info!(
        version = acr_setup_extract::VERSION,
        tarmac_variant = config.config().tarmac_variant.as_str(),
        gravel_variant = config.config().gravel_variant.as_str(),
        "ACR 调校提取启动"
    );

    // ==========================================
    // 提取
    // ==========================================
    let files = collect_content_files(&args.inputs).context("收集输入文件失败")?;
    info!(files = files.len(), "输入文件已收集");

    let config = Arc::new(config);
    let orchestrator = ExtractionOrchestrator::new(config.clone());
    let batch = orchestrator.process_batch(&files);

    // ==========================================
    // 输出
    // ==========================================
    let writer = ReportWriter::new(config.output_dir());
    writer
        .write(&batch.report, &args.report_formats())
        .with_context(|| format!("写出报告失败: {}", writer.output_dir().display()))?;

    if args.stdout {
        print!("{}", render_table(&batch.report));
    }

    for skipped in &batch.skipped {
        eprintln!("跳过 {} ({}): {}", skipped.name, skipped.source.display(), skipped.reason);
    }

    Ok(())
}

/// 调校目录查询，输出 "path\tvalue" 行
fn lookup(data_dir: &Path, car: &str, stage: &str) -> Result<String> {
    let catalog = SetupCatalog::load(data_dir)
        .with_context(|| format!("加载调校目录失败: {}", data_dir.display()))?;

    let Some(surface) = catalog.stage_surface(stage) else {
        bail!("未知赛段: {}", stage);
    };
    let Some(entry) = catalog.get_setup(car, stage) else {
        bail!("{} 在 {} 路面无调校数据", car, surface);
    };

    let mut out = format!("{} @ {} ({}, {})\n", car, stage, surface, entry.drive_type);
    for (field, value) in entry.setup.populated_fields() {
        out.push_str(&format!("{}\t{}\n", field.path(), value));
    }
    Ok(out)
}
