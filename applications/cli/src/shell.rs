//! Line-oriented command shell
//!
//! Song and playlist arguments are 1-based row numbers as printed by `ls`
//! and `lists`. After every command the shell delivers pending engine
//! events, fires any scheduled error skip, and logs the state events the
//! manager emitted.

use crate::config::{ExportSettings, GrooveConfig};
use crate::engine::LoggingEngine;
use crate::error::{CliError, Result};
use groove_core::{
    error::GrooveError,
    traits::{DurableStore, MetadataExtractor},
    types::{PlaylistId, Song, SongId, SongImport, SourceRef, View},
};
use groove_metadata::{discover_audio_files, LoftyExtractor};
use groove_playback::{PlaybackManager, PlaybackState};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const HELP: &str = "\
Library:   import <path> | ls | rm <n> | clear
Views:     view library|history|<list#> | search [term]
Playback:  play <n> | toggle | next | prev | mode | seek <secs> | vol <0-100> | mute
           tick <secs> | fail [message] | queue | qmove <from> <to> | status
Playlists: lists | new <name> | drop <list#> | rename <list#> <name>
           add <list#> <n>... | unlist <n> | move <from> <to>
Batch:     batch | sel <n>... | selall | bdelete | badd <list#>... | bexport <dir>
           help | quit";

/// Whether the shell keeps reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Shell {
    manager: PlaybackManager,
    engine: LoggingEngine,
    extractor: Box<dyn MetadataExtractor>,
    export: ExportSettings,
}

impl Shell {
    pub fn new(config: &GrooveConfig, store: Box<dyn DurableStore>) -> Self {
        let engine = LoggingEngine::new();
        let manager =
            PlaybackManager::new(config.playback.clone(), Box::new(engine.clone()), store);
        Self {
            manager,
            engine,
            extractor: Box::new(LoftyExtractor::new()),
            export: config.export.clone(),
        }
    }

    /// Seed the session from the durable store
    pub fn load(&mut self) -> Result<()> {
        self.manager.load_from_store()?;
        self.pump();
        Ok(())
    }

    pub fn manager(&self) -> &PlaybackManager {
        &self.manager
    }

    pub fn engine(&self) -> &LoggingEngine {
        &self.engine
    }

    /// Read commands until EOF or `quit`
    ///
    /// Command errors are printed and the loop carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        write!(out, "groove> ")?;
        out.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.execute(&line, out) {
                Ok(Flow::Quit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(e) => writeln!(out, "error: {}", e)?,
            }
            write!(out, "groove> ")?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    /// Run one command line
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };

        let result = self.dispatch(command, args, out);
        self.pump();
        result
    }

    fn dispatch<W: Write>(&mut self, command: &str, args: &[&str], out: &mut W) -> Result<Flow> {
        match command {
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(Flow::Quit),

            // Library
            "import" => {
                let path = args
                    .first()
                    .ok_or_else(|| CliError::usage("import <path>"))?;
                let count = self.import_path(Path::new(path))?;
                writeln!(out, "Imported {} file(s)", count)?;
            }
            "ls" => self.print_view(out)?,
            "rm" => {
                let id = self.song_arg(args, 0, "rm <n>")?;
                self.manager.delete_song(&id)?;
            }
            "clear" => {
                self.manager.clear_library();
                writeln!(out, "Library cleared")?;
            }

            // Views
            "view" => {
                let view = match args.first().copied() {
                    Some("library") => View::Library,
                    Some("history") => View::History,
                    Some(n) => View::Playlist(self.playlist_at(n)?),
                    None => return Err(CliError::usage("view library|history|<list#>")),
                };
                self.manager.switch_view(view)?;
                self.print_view(out)?;
            }
            "search" => {
                self.manager.set_search(&args.join(" "));
                self.print_view(out)?;
            }

            // Playback
            "play" => {
                let id = self.song_arg(args, 0, "play <n>")?;
                self.manager.play_song(&id)?;
                self.print_now_playing(out)?;
            }
            "toggle" | "p" => {
                self.manager.toggle_play()?;
                self.print_now_playing(out)?;
            }
            "next" | "n" => {
                self.manager.next()?;
                self.print_now_playing(out)?;
            }
            "prev" => {
                self.manager.previous()?;
                self.print_now_playing(out)?;
            }
            "mode" => {
                let mode = self.manager.cycle_mode();
                writeln!(out, "Mode: {:?}", mode)?;
            }
            "seek" => {
                let secs = parse_number::<f64>(args, 0, "seek <secs>")?;
                self.manager.seek(secs);
            }
            "vol" => {
                let percent = parse_number::<f32>(args, 0, "vol <0-100>")?;
                self.manager.set_volume(percent / 100.0);
                writeln!(out, "Volume: {:.0}%", self.manager.volume() * 100.0)?;
            }
            "mute" => {
                self.manager.toggle_mute();
                let label = if self.manager.is_muted() { "muted" } else { "unmuted" };
                writeln!(out, "Volume {}", label)?;
            }
            "tick" => {
                let secs = parse_number::<f64>(args, 0, "tick <secs>")?;
                self.engine.tick(secs);
            }
            "fail" => {
                let message = if args.is_empty() {
                    "simulated decode error".to_string()
                } else {
                    args.join(" ")
                };
                self.engine.fail(message);
            }
            "queue" => self.print_queue(out)?,
            "qmove" => {
                let from = parse_index(args, 0, "qmove <from> <to>")?;
                let to = parse_index(args, 1, "qmove <from> <to>")?;
                self.manager.reorder_queue(from, to)?;
                self.print_queue(out)?;
            }
            "status" => self.print_status(out)?,

            // Playlists
            "lists" => self.print_playlists(out)?,
            "new" => {
                let id = self.manager.create_playlist(&args.join(" "))?;
                writeln!(out, "Created playlist {}", id)?;
            }
            "drop" => {
                let id = self.playlist_arg(args, 0, "drop <list#>")?;
                self.manager.delete_playlist(&id)?;
            }
            "rename" => {
                let id = self.playlist_arg(args, 0, "rename <list#> <name>")?;
                self.manager.rename_playlist(&id, &args[1..].join(" "))?;
            }
            "add" => {
                let id = self.playlist_arg(args, 0, "add <list#> <n>...")?;
                let songs = self.song_args(&args[1..])?;
                let added = self.manager.add_to_playlist(&id, &songs)?;
                writeln!(out, "Added {} song(s)", added)?;
            }
            "unlist" => {
                let Some(playlist) = self.manager.active_view().playlist_id().cloned() else {
                    return Err(CliError::usage("unlist works inside a playlist view"));
                };
                let song = self.song_arg(args, 0, "unlist <n>")?;
                self.manager.remove_from_playlist(&playlist, &song)?;
                self.print_view(out)?;
            }
            "move" => {
                let from = parse_index(args, 0, "move <from> <to>")?;
                let to = parse_index(args, 1, "move <from> <to>")?;
                self.manager.reorder_view(from, to)?;
                self.print_view(out)?;
            }

            // Batch
            "batch" => {
                let active = self.manager.toggle_batch_mode();
                writeln!(out, "Batch mode {}", if active { "on" } else { "off" })?;
            }
            "sel" => {
                for id in self.song_args(args)? {
                    self.manager.toggle_select(&id);
                }
                writeln!(out, "{} selected", self.manager.selection().len())?;
            }
            "selall" => {
                self.manager.select_all_toggle();
                writeln!(out, "{} selected", self.manager.selection().len())?;
            }
            "bdelete" => {
                let deleted = self.manager.apply_delete();
                writeln!(out, "Deleted {} song(s)", deleted)?;
            }
            "badd" => {
                let targets = args
                    .iter()
                    .map(|n| self.playlist_at(n))
                    .collect::<Result<Vec<_>>>()?;
                let added = self.manager.apply_add_to_playlists(&targets)?;
                writeln!(out, "Added {} song(s)", added)?;
            }
            "bexport" => {
                let dir = args
                    .first()
                    .ok_or_else(|| CliError::usage("bexport <dir>"))?;
                let exported = self.export_selection(Path::new(dir), out)?;
                writeln!(out, "Exported {} file(s)", exported)?;
            }

            other => {
                return Err(CliError::usage(format!(
                    "unknown command '{}' (try 'help')",
                    other
                )))
            }
        }
        Ok(Flow::Continue)
    }

    /// Import every audio file under `path`
    ///
    /// Tags are applied right after each import; files whose tags cannot
    /// be read keep their filename-derived fields.
    pub fn import_path(&mut self, path: &Path) -> Result<usize> {
        let files = discover_audio_files(path)?;

        for file in &files {
            let file_name = file
                .file_name()
                .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
            let source = SourceRef::new(file.to_string_lossy().into_owned());
            let id = self.manager.import(SongImport::new(file_name, source));

            match self.extractor.extract(file) {
                Ok(patch) => {
                    self.manager.apply_metadata(&id, &patch);
                }
                Err(e) => {
                    let degraded = GrooveError::ImportDegraded(e.to_string());
                    warn!(path = %file.display(), error = %degraded, "Using filename defaults");
                }
            }
        }

        info!(count = files.len(), path = %path.display(), "Import finished");
        self.pump();
        Ok(files.len())
    }

    /// Copy the batch selection into `dir`, one file at a time
    fn export_selection<W: Write>(&mut self, dir: &Path, out: &mut W) -> Result<usize> {
        let items = self.manager.apply_export();
        if items.is_empty() {
            return Ok(0);
        }
        fs::create_dir_all(dir)?;

        let pacing = Duration::from_millis(self.export.pacing_ms);
        let mut exported = 0;
        for (i, item) in items.iter().enumerate() {
            if i > 0 && !pacing.is_zero() {
                thread::sleep(pacing);
            }

            let source = PathBuf::from(item.source.as_str());
            let target = dir.join(
                source
                    .file_name()
                    .map_or_else(|| item.title.clone().into(), ToOwned::to_owned),
            );
            match fs::copy(&source, &target) {
                Ok(_) => {
                    exported += 1;
                    writeln!(out, "  {} -> {}", item.title, target.display())?;
                }
                Err(e) => {
                    warn!(song = %item.song_id, error = %e, "Export failed");
                }
            }
        }
        Ok(exported)
    }

    /// Deliver engine events and fire a due error skip
    fn pump(&mut self) {
        loop {
            let events = self.engine.take_events();
            if events.is_empty() {
                break;
            }
            for event in events {
                if let Err(e) = self.manager.handle_engine_event(event) {
                    warn!(error = %e, "Engine event failed");
                }
            }
        }

        if let Err(e) = self.manager.poll(Instant::now()) {
            warn!(error = %e, "Scheduled skip failed");
        }

        for event in self.manager.drain_events() {
            debug!(?event, "State event");
        }
    }

    // ===== Argument helpers =====

    fn song_arg(&self, args: &[&str], index: usize, usage: &str) -> Result<SongId> {
        let arg = args.get(index).ok_or_else(|| CliError::usage(usage))?;
        self.song_at(arg)
    }

    fn song_args(&self, args: &[&str]) -> Result<Vec<SongId>> {
        args.iter().map(|arg| self.song_at(arg)).collect()
    }

    fn song_at(&self, arg: &str) -> Result<SongId> {
        let songs = self.manager.view_songs();
        let row = parse_row(arg, songs.len())?;
        Ok(songs[row].id.clone())
    }

    fn playlist_arg(&self, args: &[&str], index: usize, usage: &str) -> Result<PlaylistId> {
        let arg = args.get(index).ok_or_else(|| CliError::usage(usage))?;
        self.playlist_at(arg)
    }

    fn playlist_at(&self, arg: &str) -> Result<PlaylistId> {
        let playlists = self.manager.playlists().all();
        let row = parse_row(arg, playlists.len())?;
        Ok(playlists[row].id.clone())
    }

    // ===== Output =====

    fn print_view<W: Write>(&self, out: &mut W) -> Result<()> {
        let songs = self.manager.view_songs();
        let search = self.manager.search();
        if search.trim().is_empty() {
            writeln!(out, "[{}] {} song(s)", self.manager.active_view(), songs.len())?;
        } else {
            writeln!(
                out,
                "[{}] {} song(s) matching '{}'",
                self.manager.active_view(),
                songs.len(),
                search.trim()
            )?;
        }

        let current = self.manager.current_song().map(|s| s.id.clone());
        let selection = self.manager.selection();
        for (i, song) in songs.iter().enumerate() {
            let marker = if current.as_ref() == Some(&song.id) { '*' } else { ' ' };
            let check = match (selection.is_active(), selection.contains(&song.id)) {
                (false, _) => "",
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
            };
            writeln!(out, "{}{:>3}. {}{}", marker, i + 1, check, describe(song))?;
        }
        Ok(())
    }

    fn print_queue<W: Write>(&self, out: &mut W) -> Result<()> {
        let queue = self.manager.queue();
        writeln!(out, "Queue ({:?}): {} song(s)", queue.mode(), queue.len())?;
        for (i, id) in queue.items().iter().enumerate() {
            let marker = if queue.current_index() == Some(i) { '*' } else { ' ' };
            let title = self
                .manager
                .library()
                .get(id)
                .map_or("<deleted>", |s| s.title.as_str());
            writeln!(out, "{}{:>3}. {}", marker, i + 1, title)?;
        }
        Ok(())
    }

    fn print_playlists<W: Write>(&self, out: &mut W) -> Result<()> {
        for (i, playlist) in self.manager.playlists().all().iter().enumerate() {
            writeln!(
                out,
                "{:>3}. {} ({} song(s))",
                i + 1,
                playlist.name,
                playlist.song_ids.len()
            )?;
        }
        Ok(())
    }

    fn print_now_playing<W: Write>(&self, out: &mut W) -> Result<()> {
        match (self.manager.state(), self.manager.current_song()) {
            (PlaybackState::Stopped, _) | (_, None) => writeln!(out, "Stopped")?,
            (state, Some(song)) => writeln!(out, "{:?}: {}", state, describe(song))?,
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        self.print_now_playing(out)?;
        writeln!(
            out,
            "Position {} / {}  Mode {:?}  Volume {:.0}%{}",
            format_time(self.manager.position_secs()),
            format_time(self.manager.duration_secs()),
            self.manager.mode(),
            self.manager.volume() * 100.0,
            if self.manager.is_muted() { " (muted)" } else { "" }
        )?;
        writeln!(
            out,
            "Library {}  History {}  View {}",
            self.manager.library().len(),
            self.manager.history_songs().len(),
            self.manager.active_view()
        )?;
        Ok(())
    }
}

fn describe(song: &Song) -> String {
    format!(
        "{} - {} [{}] {}",
        song.title,
        song.artist,
        song.album,
        format_time(song.duration_seconds)
    )
}

/// `m:ss`
fn format_time(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// 1-based row number to a 0-based index
fn parse_row(arg: &str, len: usize) -> Result<usize> {
    let n: usize = arg
        .parse()
        .map_err(|_| CliError::usage(format!("'{}' is not a row number", arg)))?;
    if n == 0 || n > len {
        return Err(GrooveError::IndexOutOfBounds { index: n, len }.into());
    }
    Ok(n - 1)
}

/// 1-based position argument to a 0-based index (not range-checked)
fn parse_index(args: &[&str], index: usize, usage: &str) -> Result<usize> {
    let n: usize = parse_number(args, index, usage)?;
    n.checked_sub(1).ok_or_else(|| CliError::usage(usage))
}

fn parse_number<T: std::str::FromStr>(args: &[&str], index: usize, usage: &str) -> Result<T> {
    args.get(index)
        .and_then(|arg| arg.parse().ok())
        .ok_or_else(|| CliError::usage(usage))
}
