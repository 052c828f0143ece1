//! Text commands read by the console front end

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};

use crate::config::ShapeColor;
use crate::domain::{Rect, ScreenPoint};
use crate::session::messages::{MouseButton, Msg};

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str) -> anyhow::Result<Option<Msg>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let msg = match command.to_ascii_lowercase().as_str() {
        "press" | "release" => {
            let (point, button) = pointer_args(&args)?;
            if command.eq_ignore_ascii_case("press") {
                Msg::Press(button, point)
            } else {
                Msg::Release(button, point)
            }
        }
        "resize" => {
            expect_len(&args, 2, "resize W H")?;
            Msg::resize(number(args[0], "width")?, number(args[1], "height")?)
        }
        "paint" => match args.as_slice() {
            [] => Msg::Paint {
                region: None,
                path: None,
            },
            [path] => Msg::Paint {
                region: None,
                path: Some(PathBuf::from(path)),
            },
            [path, x, y, w, h] => Msg::Paint {
                region: Some(Rect::from_xywh(
                    number(x, "x")?,
                    number(y, "y")?,
                    number(w, "width")?,
                    number(h, "height")?,
                )),
                path: Some(PathBuf::from(path)),
            },
            _ => bail!("usage: paint [PATH [X Y W H]]"),
        },
        "open" => {
            expect_len(&args, 1, "open PATH")?;
            Msg::Open(PathBuf::from(args[0]))
        }
        "save" => match args.as_slice() {
            [] => Msg::Save {
                path: None,
                format: None,
            },
            [path] => Msg::save_to(path),
            [path, format] => Msg::Save {
                path: Some(PathBuf::from(path)),
                format: Some(format.to_ascii_lowercase()),
            },
            _ => bail!("usage: save [PATH [FORMAT]]"),
        },
        "clear" => Msg::Clear,
        "color" | "colour" => Msg::PenColor(color_args(&args)?),
        "width" => {
            expect_len(&args, 1, "width N")?;
            let width: u32 = number(args[0], "pen width")?;
            if width == 0 {
                bail!("pen width must be at least 1");
            }
            Msg::PenWidth(width)
        }
        "list" | "ls" => Msg::List,
        "remember" => Msg::Remember,
        "help" | "?" => Msg::Help,
        "quit" | "exit" | "q" => Msg::Quit,
        other => bail!("unknown command {other:?}, try `help`"),
    };
    Ok(Some(msg))
}

fn expect_len(args: &[&str], len: usize, usage: &str) -> anyhow::Result<()> {
    if args.len() != len {
        bail!("usage: {usage}");
    }
    Ok(())
}

fn number<T: FromStr>(text: &str, what: &str) -> anyhow::Result<T> {
    text.parse()
        .map_err(|_| anyhow!("invalid {what} {text:?}"))
}

fn pointer_args(args: &[&str]) -> anyhow::Result<(ScreenPoint, MouseButton)> {
    let (x, y, button) = match args {
        [x, y] => (x, y, MouseButton::Left),
        [x, y, button] => {
            let button = MouseButton::from_name(&button.to_ascii_lowercase())
                .with_context(|| format!("unknown button {button:?}"))?;
            (x, y, button)
        }
        _ => bail!("usage: press|release X Y [left|right|middle]"),
    };
    Ok((ScreenPoint::new(number(x, "x")?, number(y, "y")?), button))
}

fn color_args(args: &[&str]) -> anyhow::Result<ShapeColor> {
    match args {
        [hex] => ShapeColor::from_hex(hex).with_context(|| format!("invalid color {hex:?}")),
        [r, g, b] => Ok(ShapeColor::new(
            number(r, "red")?,
            number(g, "green")?,
            number(b, "blue")?,
        )),
        _ => bail!("usage: color R G B | color #RRGGBB"),
    }
}
