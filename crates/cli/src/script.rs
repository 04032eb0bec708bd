//! Plain-text event scripts for headless sessions.
//!
//! One event per line, `#` starts a comment:
//!
//! ```text
//! key +            # printable key, or up/down/left/right/escape
//! key d shift+ctrl # optional modifiers
//! press left 100 100
//! motion left 130 90
//! release left 130 90
//! button -1 130 90 # signed host code: 1..5, negative = release
//! resize 1024 768
//! expose
//! ```

use anyhow::{anyhow, bail, Context, Result};
use katzview::host::Event;
use katzview::viewer::{Button, ButtonAction, ButtonMask, Key, Modifiers};

fn parse_key(tok: &str) -> Result<Key> {
    let key = match tok.to_ascii_lowercase().as_str() {
        "up" => Key::Up,
        "down" => Key::Down,
        "left" => Key::Left,
        "right" => Key::Right,
        "escape" | "esc" => Key::Escape,
        _ => {
            let mut chars = tok.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Key::Char(c),
                _ => bail!("unknown key {tok:?}"),
            }
        }
    };
    Ok(key)
}

fn parse_button(tok: &str) -> Result<Button> {
    Ok(match tok {
        "left" => Button::Left,
        "middle" => Button::Middle,
        "right" => Button::Right,
        "wheelup" => Button::WheelUp,
        "wheeldown" => Button::WheelDown,
        _ => bail!("unknown button {tok:?}"),
    })
}

fn parse_mask(tok: &str) -> Result<ButtonMask> {
    tok.split('+').try_fold(ButtonMask::NONE, |mask, part| {
        let bit = match part {
            "none" => ButtonMask::NONE,
            "left" => ButtonMask::LEFT,
            "middle" => ButtonMask::MIDDLE,
            "right" => ButtonMask::RIGHT,
            _ => bail!("unknown button mask {part:?}"),
        };
        Ok(mask | bit)
    })
}

fn parse_mods(tok: &str) -> Result<Modifiers> {
    tok.split('+').try_fold(Modifiers::NONE, |mods, part| {
        let bit = match part {
            "shift" => Modifiers::SHIFT,
            "ctrl" | "control" => Modifiers::CONTROL,
            _ => bail!("unknown modifier {part:?}"),
        };
        Ok(mods | bit)
    })
}

fn num<T: std::str::FromStr>(tok: Option<&str>, what: &str) -> Result<T> {
    let tok = tok.ok_or_else(|| anyhow!("missing {what}"))?;
    tok.parse()
        .map_err(|_| anyhow!("{what} {tok:?} is not a number"))
}

fn parse_line(line: &str) -> Result<Option<Event>> {
    let line = line.split('#').next().unwrap_or("").trim();
    let mut toks = line.split_whitespace();
    let Some(verb) = toks.next() else {
        return Ok(None);
    };
    let mods = Modifiers::NONE;
    let event = match verb {
        "key" => {
            let key = parse_key(toks.next().ok_or_else(|| anyhow!("missing key"))?)?;
            let mods = toks.next().map(parse_mods).transpose()?.unwrap_or(mods);
            Event::Key { key, mods, x: 0, y: 0 }
        }
        "press" | "release" => {
            let button = parse_button(toks.next().ok_or_else(|| anyhow!("missing button"))?)?;
            let action = if verb == "press" {
                ButtonAction::Press
            } else {
                ButtonAction::Release
            };
            let x = num(toks.next(), "x")?;
            let y = num(toks.next(), "y")?;
            Event::Button { button, action, mods, x, y }
        }
        "button" => {
            let code: i32 = num(toks.next(), "button code")?;
            let (button, action) =
                Button::from_signed(code).ok_or_else(|| anyhow!("bad button code {code}"))?;
            let x = num(toks.next(), "x")?;
            let y = num(toks.next(), "y")?;
            Event::Button { button, action, mods, x, y }
        }
        "motion" => {
            let buttons = parse_mask(toks.next().ok_or_else(|| anyhow!("missing button mask"))?)?;
            let x = num(toks.next(), "x")?;
            let y = num(toks.next(), "y")?;
            Event::Motion { buttons, mods, x, y }
        }
        "resize" => Event::Resize {
            w: num(toks.next(), "width")?,
            h: num(toks.next(), "height")?,
        },
        "expose" => Event::Expose,
        _ => bail!("unknown event {verb:?}"),
    };
    if let Some(extra) = toks.next() {
        bail!("unexpected trailing token {extra:?}");
    }
    Ok(Some(event))
}

/// Parse a whole script.
pub fn parse_script(text: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(ev) = parse_line(line).with_context(|| format!("script line {}", i + 1))? {
            events.push(ev);
        }
    }
    Ok(events)
}
