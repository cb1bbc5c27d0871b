//! Command-line parsing.
//!
//! ```text
//! timetable [--config PATH] classes
//! timetable [--config PATH] periods
//! timetable [--config PATH] show   [CLASS] [--view week|day|agenda] [--date YYYY-MM-DD] [--weekends]
//! timetable [--config PATH] stats  [CLASS]
//! timetable [--config PATH] create CLASS --teacher ID --subject ID --date YYYY-MM-DD --period N
//! timetable [--config PATH] update CLASS ENTRY --teacher ID --subject ID --date YYYY-MM-DD --period N
//! timetable [--config PATH] delete CLASS ENTRY
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;

use timetable_common::calendar::ViewMode;
use timetable_common::form::EventForm;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Classes,
    Periods,
    Show {
        class: Option<String>,
        view: Option<ViewMode>,
        date: Option<NaiveDate>,
        weekends: bool,
    },
    Stats {
        class: Option<String>,
    },
    Create {
        class: String,
        form: EventForm,
    },
    Update {
        class: String,
        id: String,
        form: EventForm,
    },
    Delete {
        class: String,
        id: String,
    },
}

pub const USAGE: &str = "usage: timetable [--config PATH] \
<classes|periods|show|stats|create|update|delete> [ARGS]";

pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut config = None;
    let mut positional = Vec::new();
    let mut flags: Vec<(String, Option<String>)> = Vec::new();

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(it.next().context("--config needs a path")?));
            }
            "--weekends" => flags.push((arg, None)),
            flag if flag.starts_with("--") => {
                let value = it.next().with_context(|| format!("{flag} needs a value"))?;
                flags.push((arg, Some(value)));
            }
            _ => positional.push(arg),
        }
    }

    let flag = |name: &str| -> Option<String> {
        flags
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .and_then(|(_, v)| v.clone())
    };
    let has_flag = |name: &str| flags.iter().any(|(k, _)| k == name);

    let mut pos = positional.into_iter();
    let Some(name) = pos.next() else {
        bail!("missing command\n{USAGE}");
    };

    let command = match name.as_str() {
        "classes" => Command::Classes,
        "periods" => Command::Periods,
        "show" => Command::Show {
            class: pos.next(),
            view: flag("--view")
                .map(|v| v.parse::<ViewMode>())
                .transpose()
                .map_err(anyhow::Error::msg)?,
            date: flag("--date").map(|d| parse_date(&d)).transpose()?,
            weekends: has_flag("--weekends"),
        },
        "stats" => Command::Stats { class: pos.next() },
        "create" => Command::Create {
            class: pos.next().context("create needs a CLASS")?,
            form: form_from_flags(&flag)?,
        },
        "update" => Command::Update {
            class: pos.next().context("update needs a CLASS")?,
            id: pos.next().context("update needs an ENTRY id")?,
            form: form_from_flags(&flag)?,
        },
        "delete" => Command::Delete {
            class: pos.next().context("delete needs a CLASS")?,
            id: pos.next().context("delete needs an ENTRY id")?,
        },
        other => bail!("unknown command: {other}\n{USAGE}"),
    };

    Ok(Args { config, command })
}

/// Form fields from flags.  Missing ones stay empty so that validation
/// reports every problem at once.
fn form_from_flags(flag: &dyn Fn(&str) -> Option<String>) -> Result<EventForm> {
    let period = match flag("--period") {
        // Periods are numbered from 1 on the command line.
        Some(p) => {
            let n: usize = p.parse().with_context(|| format!("bad period: {p}"))?;
            Some(n.checked_sub(1).context("periods are numbered from 1")?)
        }
        None => None,
    };
    Ok(EventForm {
        teacher_id: flag("--teacher").unwrap_or_default(),
        subject_id: flag("--subject").unwrap_or_default(),
        date: flag("--date").unwrap_or_default(),
        period,
    })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("bad date (want YYYY-MM-DD): {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Result<Args> {
        parse(s.split_whitespace().map(String::from))
    }

    #[test]
    fn test_show_with_flags() {
        let a = args("--config /tmp/t.conf show c5a --view day --date 2026-10-19 --weekends").unwrap();
        assert_eq!(a.config, Some(PathBuf::from("/tmp/t.conf")));
        assert_eq!(
            a.command,
            Command::Show {
                class: Some("c5a".into()),
                view: Some(ViewMode::Day),
                date: NaiveDate::from_ymd_opt(2026, 10, 19),
                weekends: true,
            }
        );
    }

    #[test]
    fn test_create_form() {
        let a = args("create c5a --teacher t1 --subject s1 --date 2026-10-20 --period 3").unwrap();
        let Command::Create { class, form } = a.command else {
            panic!("expected create");
        };
        assert_eq!(class, "c5a");
        assert_eq!(form.period, Some(2));
        assert_eq!(form.teacher_id, "t1");
    }

    #[test]
    fn test_errors() {
        assert!(args("").is_err());
        assert!(args("explode").is_err());
        assert!(args("delete c5a").is_err());
        assert!(args("show --view month").is_err());
        assert!(args("create c5a --period 0").is_err());
    }
}
