use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thinkbot_core::{AppViewModel, Msg, Timestamp};

use super::ui::constants::PAGE_SCROLL_LINES;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Dispatch(Msg),
    Quit,
}

pub fn map_key(key: KeyEvent, view: &AppViewModel, now: Timestamp) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let msg = match key.code {
        KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Char('l') if ctrl => Msg::ClearClicked { at: now },
        KeyCode::Enter => Msg::SendClicked { at: now },
        KeyCode::Tab => Msg::EndpointSelected(view.endpoint.next().selector_value().to_string()),
        KeyCode::BackTab => {
            Msg::EndpointSelected(view.endpoint.prev().selector_value().to_string())
        }
        KeyCode::PageUp => Msg::ScrollBy(PAGE_SCROLL_LINES),
        KeyCode::PageDown => Msg::ScrollBy(-PAGE_SCROLL_LINES),
        KeyCode::Backspace => {
            let mut text = view.input.clone();
            text.pop()?;
            Msg::InputChanged(text)
        }
        KeyCode::Char(c) if !ctrl => Msg::InputChanged(format!("{}{c}", view.input)),
        _ => return None,
    };
    Some(Action::Dispatch(msg))
}

/// Pasted text is a single message line.
pub fn map_paste(text: &str, view: &AppViewModel) -> Option<Action> {
    let pasted: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    if pasted.is_empty() {
        return None;
    }
    Some(Action::Dispatch(Msg::InputChanged(format!(
        "{}{pasted}",
        view.input
    ))))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use thinkbot_core::Endpoint;

    use super::*;

    fn now() -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_with_input(input: &str) -> AppViewModel {
        AppViewModel {
            input: input.to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn typing_appends_to_input() {
        let action = map_key(key(KeyCode::Char('i')), &view_with_input("h"), now());
        assert_eq!(
            action,
            Some(Action::Dispatch(Msg::InputChanged("hi".to_string())))
        );
    }

    #[test]
    fn backspace_on_empty_input_does_nothing() {
        assert_eq!(map_key(key(KeyCode::Backspace), &view_with_input(""), now()), None);
        assert_eq!(
            map_key(key(KeyCode::Backspace), &view_with_input("ab"), now()),
            Some(Action::Dispatch(Msg::InputChanged("a".to_string())))
        );
    }

    #[test]
    fn enter_submits_and_ctrl_l_clears() {
        let view = view_with_input("question");
        assert_eq!(
            map_key(key(KeyCode::Enter), &view, now()),
            Some(Action::Dispatch(Msg::SendClicked { at: now() }))
        );
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
                &view,
                now()
            ),
            Some(Action::Dispatch(Msg::ClearClicked { at: now() }))
        );
    }

    #[test]
    fn tab_cycles_selector_values() {
        let view = AppViewModel {
            endpoint: Endpoint::Answer,
            ..AppViewModel::default()
        };
        assert_eq!(
            map_key(key(KeyCode::Tab), &view, now()),
            Some(Action::Dispatch(Msg::EndpointSelected(
                Endpoint::Answer.next().selector_value().to_string()
            )))
        );
        assert_eq!(
            map_key(key(KeyCode::BackTab), &view, now()),
            Some(Action::Dispatch(Msg::EndpointSelected("search".to_string())))
        );
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let view = AppViewModel::default();
        assert_eq!(map_key(key(KeyCode::Esc), &view, now()), Some(Action::Quit));
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &view,
                now()
            ),
            Some(Action::Quit)
        );
    }

    #[test]
    fn paste_flattens_newlines() {
        assert_eq!(
            map_paste("a\nb", &view_with_input(">")),
            Some(Action::Dispatch(Msg::InputChanged(">a b".to_string())))
        );
        assert_eq!(map_paste("", &view_with_input("x")), None);
    }
}
