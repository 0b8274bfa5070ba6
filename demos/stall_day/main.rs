//! Playable stall in a plain terminal.
//!
//! Keys are read line by line from stdin (type one or more keys, then Enter); each
//! frame consumes at most one key. Pass a TOML file path to override the defaults.

use std::fmt::Write as _;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use shawarma::core::prep::PrepState;
use shawarma::core::production::UnitStage;
use shawarma::{
    DayRunner, DayView, InputSource, Renderer, SideItem, Stall, StallConfig, Upgrade,
};

/// Keys typed on stdin, delivered without blocking the frame loop
struct StdinInput {
    keys: Receiver<char>,
    closed: bool,
}

impl StdinInput {
    fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                for key in line.chars().filter(|c| !c.is_whitespace()) {
                    if tx.send(key).is_err() {
                        return;
                    }
                }
            }
        });
        Self {
            keys: rx,
            closed: false,
        }
    }

    /// Wait for the next key; `None` once stdin is closed
    fn wait_key(&mut self) -> Option<char> {
        match self.keys.recv() {
            Ok(key) => Some(key),
            Err(_) => {
                self.closed = true;
                None
            }
        }
    }
}

impl InputSource for StdinInput {
    fn poll_key(&mut self) -> Option<char> {
        match self.keys.try_recv() {
            Ok(key) => Some(key),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                if !self.closed {
                    self.closed = true;
                    // stdin ended mid-day, close the stall
                    return Some('q');
                }
                None
            }
        }
    }
}

/// Prints the stall whenever what it would show changes
#[derive(Default)]
struct TextRenderer {
    last: String,
}

impl TextRenderer {
    fn draw(view: &DayView<'_>) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "== Day {} | time {:>3} | coins {} | capacity {} ==",
            view.day,
            view.remaining_secs,
            view.meta.coins(),
            view.meta.capacity()
        );
        let stock: Vec<String> = view
            .pool
            .levels()
            .map(|(resource, count, max)| format!("{} {}/{}", resource, count, max))
            .collect();
        let _ = writeln!(out, "stock: {}", stock.join(", "));

        let prep = |state: PrepState| match state {
            PrepState::Idle => "empty",
            PrepState::Taken => "container taken",
            PrepState::Ready => "ready",
        };
        let _ = writeln!(
            out,
            "fries: {} | drink: {}",
            prep(view.sides.ticket(SideItem::Fries).state()),
            prep(view.sides.ticket(SideItem::Drink).state())
        );

        match view.pipeline.open_unit() {
            Some(unit) => {
                let _ = writeln!(
                    out,
                    "open flatbread: {} (next topping: {})",
                    unit.toppings().describe(),
                    view.next_topping
                );
            }
            None => {
                let _ = writeln!(out, "open flatbread: none");
            }
        }
        for (i, slot) in view.pipeline.wrap_area().slots().enumerate() {
            let line = match slot {
                Some(unit) if unit.stage() == UnitStage::Done => {
                    format!("{} (grilled)", unit.toppings().describe())
                }
                Some(unit) => unit.toppings().describe(),
                None => "empty".to_string(),
            };
            let _ = writeln!(out, "wrap {}: {}", i + 1, line);
        }
        for (i, slot) in view.pipeline.grill().slots().enumerate() {
            let line = match slot.map(|unit| unit.stage()) {
                Some(UnitStage::Grilling { elapsed, needed }) => {
                    format!("grilling {}/{}", elapsed, needed)
                }
                Some(UnitStage::Done) => "done".to_string(),
                _ => "empty".to_string(),
            };
            let _ = writeln!(out, "grill {}: {}", i + 1, line);
        }

        for (i, customer) in view.queue.iter().enumerate() {
            let filled = (customer.patience_ratio() * 20.0).round() as usize;
            let _ = writeln!(
                out,
                "customer {}: {:<28} [{:<20}]{}",
                i + 1,
                customer.order().to_string(),
                "#".repeat(filled.min(20)),
                if customer.is_served() { " served" } else { "" }
            );
        }
        let _ = writeln!(out, "message: {}", view.message);
        let _ = writeln!(
            out,
            "keys: B bread  I topping  R roll  G grill  T take  S serve  F fries box  \
             C cup  P restock  M meat  D potato  J fry  Q close"
        );
        out
    }
}

impl Renderer for TextRenderer {
    fn render(&mut self, view: &DayView<'_>) {
        let frame = Self::draw(view);
        if frame != self.last {
            println!("{}", frame);
            self.last = frame;
        }
    }
}

fn upgrade_menu(stall: &mut Stall, input: &mut StdinInput) {
    loop {
        let price = stall.config().upgrades.price;
        println!("== Upgrades (coins: {}) ==", stall.meta().coins());
        for (key, upgrade) in ['a', 'g', 'e'].iter().zip(Upgrade::ALL) {
            let owned = if stall.meta().has(upgrade) { " [owned]" } else { "" };
            println!("{} {} price: {}{}", key.to_ascii_uppercase(), upgrade, price, owned);
        }
        println!("B back");

        let upgrade = match input.wait_key().map(|k| k.to_ascii_lowercase()) {
            Some('a') => Upgrade::AutoMeat,
            Some('g') => Upgrade::GoldPlate,
            Some('e') => Upgrade::Expand,
            Some('b') | None => return,
            Some(_) => continue,
        };
        if let Err(err) = stall.purchase(upgrade) {
            println!("{}", err);
        }
    }
}

fn load_config() -> Result<StallConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let source = std::fs::read_to_string(&path)?;
            Ok(StallConfig::from_toml_str(&source)?)
        }
        None => Ok(StallConfig::default()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp(None)
        .init();

    let config = load_config()?;
    let frames_per_second = config.day.frames_per_second;
    let mut stall = Stall::new(config)?;
    let mut input = StdinInput::spawn();

    loop {
        println!("== Shawarma stall ==");
        println!("days played: {}", stall.meta().day());
        println!("coins: {}", stall.meta().coins());
        println!("N new day | U upgrades | Q quit");

        match input.wait_key().map(|k| k.to_ascii_lowercase()) {
            Some('n') => {
                let mut day = stall.open_seeded_day();
                DayRunner::paced(frames_per_second).run(
                    &mut day,
                    &mut input,
                    &mut TextRenderer::default(),
                );
                let report = day.finish();
                println!(
                    "Day {} closed: {} served, {} walked out, +{} coins",
                    report.day,
                    report.stats.served,
                    report.stats.walked_out,
                    report.stats.coins_earned
                );
                if input.closed {
                    return Ok(());
                }
            }
            Some('u') => upgrade_menu(&mut stall, &mut input),
            Some('q') | None => return Ok(()),
            Some(_) => {}
        }
    }
}
