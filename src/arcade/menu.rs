use crate::arcade::minigame::MinigameId;

/// One row of the game corner menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: MinigameId,
    pub name: &'static str,
    pub cost: u32,
    pub unlocked: bool,
}

pub fn format_menu(entries: &[MenuEntry]) -> String {
    if entries.is_empty() {
        return "No games are currently available.\n".to_string();
    }
    let mut out = String::from("Game Corner:\n");
    for (idx, entry) in entries.iter().enumerate() {
        let price = if entry.cost == 0 {
            "FREE".to_string()
        } else {
            format!("{}c", entry.cost)
        };
        if entry.unlocked {
            out.push_str(&format!("{:>2}) {} - {}\n", idx + 1, entry.name, price));
        } else {
            out.push_str(&format!("{:>2}) {} (locked)\n", idx + 1, entry.name));
        }
    }
    out.push_str("Use G# or a game name to play.\n");
    out
}

/// Resolve a player's selection: `3`, `G3`, `G 3`, a display name, or a slug.
///
/// Locked entries still resolve; the session gate decides whether they can be played.
pub fn resolve_selection<'a>(input: &str, entries: &'a [MenuEntry]) -> Option<&'a MenuEntry> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    for entry in entries {
        if entry.name.eq_ignore_ascii_case(trimmed) {
            return Some(entry);
        }
    }

    let rest = match trimmed.strip_prefix(['G', 'g']) {
        Some(rest) if rest.trim().parse::<usize>().is_ok() => rest.trim(),
        _ => trimmed,
    };
    if let Ok(idx) = rest.parse::<usize>() {
        if idx >= 1 && idx <= entries.len() {
            return entries.get(idx - 1);
        }
        return None;
    }

    let normalized = trimmed
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }
    entries.iter().find(|entry| {
        let slug: String = entry.id.slug().chars().filter(|c| *c != '_').collect();
        slug == normalized
    })
}
