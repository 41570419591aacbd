use hsd::config::Config;
use hsd::models::stock::{DateRange, FetchJob};
use hsd::services::data_service::DataService;

use anyhow::{anyhow, Context};
use clap::{App, Arg, ArgMatches, SubCommand};
use log::{error, info};
use std::error::Error;
use std::time::Duration;

// 演示用的固定下载任务：(ticker, 开始日期, 结束日期, 输出文件)
const DEMO_DOWNLOADS: [(&str, &str, &str, &str); 3] = [
    // Iberdrola, 2010-02-23 .. 2011-04-20
    ("RV011IBERDRO", "2010/2/23", "2011/4/20", "testIberdrola.xls"),
    // Banco Santander, 2010-03-01 .. 2011-01-25
    ("RV011BSCH", "2010/3/1", "2011/1/25", "testSantander.xls"),
    // Telefonica, 2009-01-01 .. 2011-01-31
    ("RV011TELEFON", "2009/1/1", "2011/1/31", "testTelefonica.xls"),
];

fn history_args(cmd: App<'static>, date_format: &'static str) -> App<'static> {
    cmd.arg(
        Arg::with_name("ticker")
            .short('t')
            .long("ticker")
            .value_name("TICKER")
            .help("Provider specific stock ticker")
            .required(true)
            .takes_value(true),
    )
    .arg(
        Arg::with_name("begin")
            .short('b')
            .long("begin")
            .value_name(date_format)
            .help("Begin date")
            .required(true)
            .takes_value(true),
    )
    .arg(
        Arg::with_name("end")
            .short('e')
            .long("end")
            .value_name(date_format)
            .help("End date")
            .required(true)
            .takes_value(true),
    )
    .arg(
        Arg::with_name("output")
            .short('o')
            .long("output")
            .value_name("FILE")
            .help("Output file, overwritten if it exists")
            .required(true)
            .takes_value(true),
    )
}

/// 解析 `provider,ticker,begin,end,output` 形式的任务描述
fn parse_job(desc: &str) -> anyhow::Result<FetchJob> {
    let parts: Vec<&str> = desc.split(',').map(str::trim).collect();
    if parts.len() != 5 {
        return Err(anyhow!(
            "expected provider,ticker,begin,end,output but got {} fields",
            parts.len()
        ));
    }
    Ok(FetchJob::new(
        parts[0],
        parts[1],
        DateRange::new(parts[2], parts[3]),
        parts[4],
    ))
}

fn history_values<'a>(matches: &'a ArgMatches) -> (&'a str, &'a str, &'a str, &'a str) {
    (
        matches.value_of("ticker").unwrap_or_default(),
        matches.value_of("begin").unwrap_or_default(),
        matches.value_of("end").unwrap_or_default(),
        matches.value_of("output").unwrap_or_default(),
    )
}

async fn run_demo(service: &DataService) {
    // 依次执行，结果不做检查
    for (ticker, begin, end, output) in DEMO_DOWNLOADS {
        service.retrieve_from_invertia(ticker, begin, end, output).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 日志输出到标准输出
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let app = App::new("hsd")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Historical stock data retrieval")
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .takes_value(true)
                .default_value("30"),
        );

    let app = app
        .subcommand(SubCommand::with_name("demo").about("Download the three sample invertia.com series"))
        .subcommand(history_args(
            SubCommand::with_name("invertia").about("Download history from invertia.com (xls)"),
            "YYYY/MM/DD",
        ))
        .subcommand(history_args(
            SubCommand::with_name("yahoo").about("Download history from Yahoo Finance (csv)"),
            "YYYY-MM-DD",
        ))
        .subcommand(
            SubCommand::with_name("google")
                .about("Print the latest quote from Google Finance as JSON")
                .arg(
                    Arg::with_name("ticker")
                        .short('t')
                        .long("ticker")
                        .value_name("TICKER")
                        .help("Stock ticker")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("batch")
                .about("Run several independent downloads concurrently")
                .arg(
                    Arg::with_name("job")
                        .short('j')
                        .long("job")
                        .value_name("PROVIDER,TICKER,BEGIN,END,OUTPUT")
                        .help("Download job; provider is invertia or yahoo")
                        .required(true)
                        .takes_value(true)
                        .multiple_occurrences(true),
                ),
        );

    let matches = app.get_matches();

    let timeout = matches
        .value_of("timeout")
        .unwrap_or("30")
        .parse::<u64>()
        .context("invalid --timeout")?;
    let config = Config::new().with_request_timeout(Duration::from_secs(timeout));
    let service = DataService::new(&config)?;

    match matches.subcommand() {
        Some(("invertia", sub)) => {
            let (ticker, begin, end, output) = history_values(sub);
            if !service.retrieve_from_invertia(ticker, begin, end, output).await {
                return Err(format!("invertia download for {} failed", ticker).into());
            }
        }
        Some(("yahoo", sub)) => {
            let (ticker, begin, end, output) = history_values(sub);
            if !service.retrieve_from_yahoo(ticker, begin, end, output).await {
                return Err(format!("Yahoo download for {} failed", ticker).into());
            }
        }
        Some(("google", sub)) => {
            let ticker = sub.value_of("ticker").unwrap_or_default();
            match service.retrieve_latest_from_google(ticker).await {
                Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
                None => {
                    error!("No quote available for {}", ticker);
                    return Err(format!("no quote for {}", ticker).into());
                }
            }
        }
        Some(("batch", sub)) => {
            let jobs = sub
                .values_of("job")
                .into_iter()
                .flatten()
                .map(parse_job)
                .collect::<anyhow::Result<Vec<_>>>()?;

            let results = service.retrieve_batch(jobs).await;
            for (job, ok) in &results {
                info!(
                    "{:<10} {:<14} {:<12} {:<12} {} -> {}",
                    job.provider,
                    job.ticker,
                    job.range.begin,
                    job.range.end,
                    job.output.display(),
                    if *ok { "ok" } else { "failed" }
                );
            }
        }
        _ => run_demo(&service).await,
    }

    Ok(())
}
