#![warn(missing_docs)]
//! # quote-lens-app binary
//!
//! Command-line driver for quote-lens.

/// CLI entry point.
fn main() {
    if let Err(error) = shell::run() {
        eprintln!("quote-lens failed: {error}");
        std::process::exit(1);
    }
}

mod shell {
    //! Text-mode driver shell: argument parsing, per-run file logging, the
    //! page event pump, and effect execution against stdout panels.

    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Sender};
    use std::sync::{Mutex, OnceLock};

    use quote_lens_app::{
        analyze_endpoint_from_env, app_version, build_http_client, load_quote_image,
        resolve_request,
    };
    use quote_lens_client::AnalysisClient;
    use quote_lens_core::LocationFields;
    use quote_lens_preview::{
        PREVIEW_MAX_HEIGHT, PREVIEW_MAX_WIDTH, PreviewContent, decode_preview_thumbnail,
    };
    use quote_lens_projection::{
        LocationSection, NATIONAL_AVERAGE_NOTICE, RenderedSections,
    };
    use quote_lens_ui::{PageController, PageEffect, PageEvent};
    use time::OffsetDateTime;
    use time::format_description::well_known::Rfc3339;

    static RUN_LOGGER: OnceLock<RunLogger> = OnceLock::new();

    #[derive(Clone, Copy, PartialEq)]
    enum LogLevel {
        Info,
        Error,
    }

    impl LogLevel {
        fn tag(self) -> &'static str {
            match self {
                Self::Info => "info",
                Self::Error => "error",
            }
        }
    }

    /// Append-only log for one driver run, kept in the temp directory so a
    /// failed analysis can be diagnosed after the process exits.
    struct RunLogger {
        sink: Mutex<File>,
    }

    impl RunLogger {
        fn create() -> Result<Self, String> {
            let path = std::env::temp_dir().join(format!(
                "quote-lens-run-{}.log",
                OffsetDateTime::now_utc().unix_timestamp()
            ));
            let mut sink = File::create(&path)
                .map_err(|error| format!("cannot create run log at {}: {error}", path.display()))?;
            let _ = writeln!(sink, "quote-lens {} run log", app_version());

            Ok(Self {
                sink: Mutex::new(sink),
            })
        }

        fn record(&self, level: LogLevel, scope: &str, detail: &str) {
            let stamp = OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_else(|_| String::from("?"));

            let Ok(mut sink) = self.sink.lock() else {
                return;
            };
            let _ = writeln!(sink, "[{stamp}] {} {scope}: {detail}", level.tag());
            // Error lines reach disk even if the process dies right after.
            if level == LogLevel::Error {
                let _ = sink.flush();
            }
        }
    }

    struct CliArgs {
        image_path: PathBuf,
        city: Option<String>,
        state: Option<String>,
        endpoint: String,
    }

    /// Messages flowing back into the single-threaded event pump.
    enum ShellMsg {
        Page(PageEvent),
        /// A fire-and-forget preview decode failed; only the worker
        /// accounting changes.
        DecodeDropped,
    }

    /// Runs one selection + submission cycle and blocks until it resolves.
    pub fn run() -> Result<(), String> {
        open_run_log()?;

        let args = parse_args(std::env::args().skip(1))?;
        log_info(
            "startup",
            &format!("version={} endpoint={}", app_version(), args.endpoint),
        );

        let client = build_http_client(&args.endpoint).map_err(|error| error.to_string())?;
        let image = load_quote_image(&args.image_path).map_err(|error| error.to_string())?;
        log_info(
            "selection",
            &format!(
                "loaded file={} media_type={} size_bytes={}",
                image.file_name,
                image.media_type,
                image.bytes.len()
            ),
        );

        let location = LocationFields::new(args.city, args.state);
        let mut controller = PageController::new();
        let (sender, receiver) = mpsc::channel::<ShellMsg>();

        sender
            .send(ShellMsg::Page(PageEvent::FileSelected(Some(image))))
            .map_err(|error| format!("event queue send failed: {error}"))?;
        sender
            .send(ShellMsg::Page(PageEvent::SubmitRequested(location)))
            .map_err(|error| format!("event queue send failed: {error}"))?;

        let mut pending_workers = 0_usize;
        let mut resolved = false;
        let mut failed = false;

        while !resolved || pending_workers > 0 {
            let message = receiver
                .recv()
                .map_err(|error| format!("event queue disconnected: {error}"))?;

            let event = match message {
                ShellMsg::Page(event) => event,
                ShellMsg::DecodeDropped => {
                    pending_workers = pending_workers.saturating_sub(1);
                    continue;
                }
            };

            match &event {
                PageEvent::RequestResolved(_) => resolved = true,
                PageEvent::PreviewDecoded { .. } => {
                    pending_workers = pending_workers.saturating_sub(1);
                }
                _ => {}
            }

            for effect in controller.handle_event(event) {
                execute_effect(
                    effect,
                    &client,
                    &sender,
                    &mut pending_workers,
                    &mut failed,
                );
            }
        }

        log_info("shutdown", "request cycle resolved");
        if failed {
            return Err("analysis request failed".to_string());
        }
        Ok(())
    }

    fn execute_effect(
        effect: PageEffect,
        client: &AnalysisClient,
        sender: &Sender<ShellMsg>,
        pending_workers: &mut usize,
        failed: &mut bool,
    ) {
        match effect {
            // The text shell has no drop target; the highlight toggle is a
            // no-op here.
            PageEffect::SetDropHighlight(_) => {}
            PageEffect::ClearPreview => {}
            PageEffect::ShowPreview(content) => match content {
                PreviewContent::Image { thumbnail, caption } => {
                    println!(
                        "[preview] {caption} ({}x{} thumbnail)",
                        thumbnail.width, thumbnail.height
                    );
                }
                PreviewContent::Caption(caption) => println!("[preview] {caption}"),
            },
            PageEffect::DecodePreview { seq, image } => {
                *pending_workers += 1;
                let worker_sender = sender.clone();
                std::thread::spawn(move || {
                    match decode_preview_thumbnail(
                        &image.bytes,
                        PREVIEW_MAX_WIDTH,
                        PREVIEW_MAX_HEIGHT,
                    ) {
                        Ok(thumbnail) => {
                            let _ = worker_sender.send(ShellMsg::Page(PageEvent::PreviewDecoded {
                                seq,
                                thumbnail,
                                caption: image.file_name,
                            }));
                        }
                        Err(error) => {
                            // Preview decoding has no user-visible failure
                            // path; the preview area simply stays empty.
                            log_error("preview", &format!("decode failed: {error}"));
                            let _ = worker_sender.send(ShellMsg::DecodeDropped);
                        }
                    }
                });
            }
            PageEffect::HideResults => {}
            PageEffect::HideError => {}
            PageEffect::SetSubmitBusy(busy) => {
                if busy {
                    println!("Analyzing quote ...");
                    log_info("request", "dispatched; submit control locked");
                } else {
                    log_info("request", "resolved; submit control released");
                }
            }
            PageEffect::DispatchRequest(request) => {
                let worker_sender = sender.clone();
                let worker_client = client.clone();
                std::thread::spawn(move || {
                    let outcome = resolve_request(&worker_client, &request);
                    let _ = worker_sender.send(ShellMsg::Page(PageEvent::RequestResolved(outcome)));
                });
            }
            PageEffect::ShowResults(sections) => {
                println!("{}", render_sections(&sections));
                log_info(
                    "render",
                    &format!("results shown, item_count={}", sections.items.len()),
                );
            }
            PageEffect::ScrollToResults => {}
            PageEffect::ShowError(message) => {
                *failed = true;
                eprintln!("[error] {message}");
                log_error("render", &format!("error shown: {message}"));
            }
            PageEffect::ScrollToError => {}
        }
    }

    fn render_sections(sections: &RenderedSections) -> String {
        let mut out = String::new();

        match &sections.location {
            LocationSection::Regional {
                place,
                multiplier_display,
                comparison,
            } => {
                out.push_str(&format!("Location: {place}\n"));
                out.push_str(&format!(
                    "Regional cost multiplier: {multiplier_display} ({})\n",
                    comparison.label()
                ));
            }
            LocationSection::NationalAverage => {
                out.push_str(&format!("Location: {NATIONAL_AVERAGE_NOTICE}\n"));
            }
        }

        let summary = &sections.summary;
        out.push_str(&format!("\n[{}] {}\n", summary.badge, summary.message));
        out.push_str(&format!("Total quoted: {}\n", summary.total_quoted));
        if let Some(comparison) = &summary.comparison {
            out.push_str(&format!("Expected average: {}\n", comparison.expected));
            out.push_str(&format!("Difference: {}\n", comparison.difference));
        }

        out.push_str("\nLine items:\n");
        for (index, item) in sections.items.iter().enumerate() {
            out.push_str(&format!(
                "{}. {} ({}) [{}]\n",
                index + 1,
                item.description,
                item.job_type_display,
                item.badge
            ));
            match &item.comparison {
                Some(comparison) => out.push_str(&format!(
                    "   Quoted: {} | Average: {} | Range: {} | Difference: {}\n",
                    item.quoted, comparison.average, comparison.range, comparison.difference
                )),
                None => out.push_str(&format!("   Quoted: {}\n", item.quoted)),
            }
            out.push_str(&format!("   {}\n", item.message));
        }

        out
    }

    fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliArgs, String> {
        let mut image_path: Option<PathBuf> = None;
        let mut city = None;
        let mut state = None;
        let mut endpoint = None;

        while let Some(argument) = args.next() {
            match argument.as_str() {
                "--city" => city = Some(next_value(&mut args, "--city")?),
                "--state" => state = Some(next_value(&mut args, "--state")?),
                "--endpoint" => endpoint = Some(next_value(&mut args, "--endpoint")?),
                "--help" | "-h" => return Err(usage()),
                other if other.starts_with("--") => {
                    return Err(format!("unknown flag '{other}'\n{}", usage()));
                }
                other => {
                    if image_path.is_some() {
                        return Err(format!("unexpected extra argument '{other}'\n{}", usage()));
                    }
                    image_path = Some(PathBuf::from(other));
                }
            }
        }

        Ok(CliArgs {
            image_path: image_path.ok_or_else(usage)?,
            city,
            state,
            endpoint: endpoint.unwrap_or_else(analyze_endpoint_from_env),
        })
    }

    fn next_value(
        args: &mut impl Iterator<Item = String>,
        flag: &str,
    ) -> Result<String, String> {
        args.next()
            .ok_or_else(|| format!("missing value for {flag}\n{}", usage()))
    }

    fn usage() -> String {
        format!(
            "quote-lens {}\n\
             usage: quote-lens-app <quote-image> [--city CITY] [--state STATE] [--endpoint URL]\n\
             \n\
             The endpoint defaults to QUOTE_LENS_ENDPOINT or the local development server.",
            app_version()
        )
    }

    fn open_run_log() -> Result<(), String> {
        if RUN_LOGGER.get().is_some() {
            return Ok(());
        }

        let logger = RunLogger::create()?;
        let _ = RUN_LOGGER.set(logger);
        Ok(())
    }

    fn log_info(scope: &str, detail: &str) {
        if let Some(logger) = RUN_LOGGER.get() {
            logger.record(LogLevel::Info, scope, detail);
        }
    }

    fn log_error(scope: &str, detail: &str) {
        if let Some(logger) = RUN_LOGGER.get() {
            logger.record(LogLevel::Error, scope, detail);
        }
    }
}
