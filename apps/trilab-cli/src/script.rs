use anyhow::{Context, Result, bail};
use glam::Vec2;
use trilab_input::{InputSnapshot, Key};

/// One scripted tick, possibly repeated.
///
/// Written as `keys[@dx:dy][*count]`: `keys` is a run of key letters
/// (`wsadrgbxvm`), `esc`, or `-` for nothing held; `@dx:dy` drags the cursor
/// by that much with the button down; `*count` repeats the step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub keys: Vec<Key>,
    pub drag: Option<Vec2>,
    pub repeat: u32,
}

impl ScriptStep {
    /// Make `snapshot` hold exactly this step's keys and apply its drag.
    pub fn apply(&self, snapshot: &mut InputSnapshot) {
        snapshot.clear_held();
        for key in &self.keys {
            snapshot.press(*key);
        }
        match self.drag {
            Some(d) => {
                snapshot.set_primary_button(true);
                snapshot.move_cursor(d.x, d.y);
            }
            None => snapshot.set_primary_button(false),
        }
    }
}

/// Parse a whitespace- or comma-separated list of steps.
pub fn parse_script(script: &str) -> Result<Vec<ScriptStep>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<ScriptStep> {
    let (body, repeat) = match token.split_once('*') {
        Some((body, n)) => (
            body,
            n.parse::<u32>()
                .with_context(|| format!("bad repeat count in step {token:?}"))?,
        ),
        None => (token, 1),
    };
    let (keys, drag) = match body.split_once('@') {
        Some((keys, d)) => (keys, Some(parse_drag(d, token)?)),
        None => (body, None),
    };
    Ok(ScriptStep {
        keys: parse_keys(keys, token)?,
        drag,
        repeat,
    })
}

fn parse_drag(text: &str, token: &str) -> Result<Vec2> {
    let Some((dx, dy)) = text.split_once(':') else {
        bail!("drag in step {token:?} must be dx:dy");
    };
    let dx = dx
        .parse::<f32>()
        .with_context(|| format!("bad drag x in step {token:?}"))?;
    let dy = dy
        .parse::<f32>()
        .with_context(|| format!("bad drag y in step {token:?}"))?;
    Ok(Vec2::new(dx, dy))
}

fn parse_keys(text: &str, token: &str) -> Result<Vec<Key>> {
    match text.to_ascii_lowercase().as_str() {
        "" | "-" => Ok(Vec::new()),
        "esc" => Ok(vec![Key::Escape]),
        letters => letters
            .chars()
            .map(|c| {
                Ok(match c {
                    'w' => Key::W,
                    's' => Key::S,
                    'a' => Key::A,
                    'd' => Key::D,
                    'r' => Key::R,
                    'g' => Key::G,
                    'b' => Key::B,
                    'x' => Key::X,
                    'v' => Key::V,
                    'm' => Key::M,
                    other => bail!("unknown key {other:?} in step {token:?}"),
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_drag_and_repeat() {
        let steps = parse_script("w*3, rd@10:-4 esc").unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].keys, vec![Key::W]);
        assert_eq!(steps[0].repeat, 3);
        assert_eq!(steps[1].keys, vec![Key::R, Key::D]);
        assert_eq!(steps[1].drag, Some(Vec2::new(10.0, -4.0)));
        assert_eq!(steps[2].keys, vec![Key::Escape]);
    }

    #[test]
    fn empty_script_has_no_steps() {
        assert!(parse_script("  ").unwrap().is_empty());
    }

    #[test]
    fn idle_step_holds_nothing() {
        let steps = parse_script("-*5").unwrap();
        assert!(steps[0].keys.is_empty());
        assert_eq!(steps[0].repeat, 5);
    }

    #[test]
    fn rejects_unknown_keys_and_bad_numbers() {
        assert!(parse_script("q").is_err());
        assert!(parse_script("w*many").is_err());
        assert!(parse_script("@1").is_err());
        assert!(parse_script("@a:1").is_err());
    }

    #[test]
    fn apply_replaces_held_keys() {
        let mut snapshot = InputSnapshot::new();
        snapshot.press(Key::S);
        let step = parse_step("w@3:4").unwrap();
        step.apply(&mut snapshot);
        assert!(snapshot.is_held(Key::W));
        assert!(!snapshot.is_held(Key::S));
        assert!(snapshot.primary_button());
        assert_eq!(snapshot.cursor(), Vec2::new(3.0, 4.0));

        parse_step("-").unwrap().apply(&mut snapshot);
        assert!(!snapshot.primary_button());
        assert_eq!(snapshot.cursor(), Vec2::new(3.0, 4.0));
    }
}
