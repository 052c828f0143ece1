//! Console front end: reads commands and answers placement prompts from the
//! same input stream

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use crate::fl;
use crate::placement::prompt::{Prompt, Prompter};

pub struct Console<R, W> {
    input: R,
    output: W,
    /// Echo prompts before reading (off when reading a script)
    interactive: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, interactive: bool) -> Self {
        Self {
            input,
            output,
            interactive,
        }
    }

    /// Next line without its terminator, or `None` at end of input
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Show the command prompt
    pub fn ready(&mut self) -> io::Result<()> {
        if self.interactive {
            write!(self.output, "flyar> ")?;
            self.output.flush()?;
        }
        Ok(())
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    fn ask_inner(&mut self, prompt: &Prompt) -> io::Result<Option<i32>> {
        loop {
            let hint = fl!(
                "prompt-hint",
                min = prompt.min,
                max = prompt.max,
                step = prompt.step,
                default = prompt.default
            );
            write!(self.output, "{} {}: ", prompt.label, hint)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if !self.interactive {
                writeln!(self.output, "{line}")?;
            }

            let answer = line.trim();
            if answer.is_empty() {
                return Ok(Some(prompt.default));
            }
            if answer.eq_ignore_ascii_case("cancel") || answer.eq_ignore_ascii_case("c") {
                return Ok(None);
            }
            match answer.parse::<i32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(fl!("prompt-not-a-number", input = answer))?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn ask(&mut self, prompt: &Prompt) -> Option<i32> {
        match self.ask_inner(prompt) {
            Ok(answer) => answer,
            Err(err) => {
                log::error!("Prompt failed, cancelling placement: {}", err);
                None
            }
        }
    }

    fn reject(&mut self, prompt: &Prompt, reason: &str) {
        let text = fl!(
            "prompt-rejected",
            min = prompt.min,
            max = prompt.max,
            reason = reason
        );
        if let Err(err) = self.say(text) {
            log::error!("Console write failed: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::prompt::Field;
    use crate::session::state::SessionConfig;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new(), false)
    }

    fn prompt(field: Field) -> Prompt {
        Prompt::new(field, &SessionConfig::default())
    }

    #[test]
    fn test_read_line_strips_terminators() {
        let mut console = console("press 1 2\r\nclear\n");
        assert_eq!(console.read_line().unwrap().as_deref(), Some("press 1 2"));
        assert_eq!(console.read_line().unwrap().as_deref(), Some("clear"));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn test_ask_parses_number() {
        let mut console = console("2\n");
        assert_eq!(console.ask(&prompt(Field::Shape)), Some(2));
    }

    #[test]
    fn test_ask_empty_takes_default() {
        let mut console = console("\n");
        assert_eq!(console.ask(&prompt(Field::XRadius)), Some(20));
    }

    #[test]
    fn test_ask_cancel_and_eof() {
        let mut console = console("cancel\n");
        assert_eq!(console.ask(&prompt(Field::Height)), None);
        assert_eq!(console.ask(&prompt(Field::Height)), None);
    }

    #[test]
    fn test_ask_retries_on_garbage() {
        let mut console = console("abc\n12\n");
        assert_eq!(console.ask(&prompt(Field::YRadius)), Some(12));
        let output = String::from_utf8(console.into_output()).unwrap();
        assert!(output.contains("abc"));
    }

    #[test]
    fn test_ready_silent_for_scripts() {
        let mut console = console("");
        console.ready().unwrap();
        assert!(console.into_output().is_empty());
    }
}
