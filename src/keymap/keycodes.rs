//! Fixed key tables shared by the normalizer and the combination parser
//!
//! Everything here assumes a US keyboard layout.

/// Keys that never produce a keypress, by keydown/keyup key code
///
/// Includes function keys `f1`..`f19` (112..=130) and the numeric keypad digits
/// (96..=105), which normalize to the same name as the digit row.
pub fn named_key(code: u32) -> Option<&'static str> {
    const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
    const FUNCTION_KEYS: [&str; 19] = [
        "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "f13",
        "f14", "f15", "f16", "f17", "f18", "f19",
    ];

    let name = match code {
        8 => "backspace",
        9 => "tab",
        13 => "enter",
        16 => "shift",
        17 => "ctrl",
        18 => "alt",
        20 => "capslock",
        27 => "esc",
        32 => "space",
        33 => "pageup",
        34 => "pagedown",
        35 => "end",
        36 => "home",
        37 => "left",
        38 => "up",
        39 => "right",
        40 => "down",
        45 => "ins",
        46 => "del",
        91 | 93 | 224 => "meta",
        96..=105 => DIGITS[(code - 96) as usize],
        112..=130 => FUNCTION_KEYS[(code - 112) as usize],
        _ => return None,
    };
    Some(name)
}

/// Punctuation keys whose keydown/keyup codes differ from their character codes
pub fn punctuation_key(code: u32) -> Option<&'static str> {
    let name = match code {
        106 => "*",
        107 => "+",
        109 => "-",
        110 => ".",
        111 => "/",
        186 => ";",
        187 => "=",
        188 => ",",
        189 => "-",
        190 => ".",
        191 => "/",
        192 => "`",
        219 => "[",
        220 => "\\",
        221 => "]",
        222 => "'",
        _ => return None,
    };
    Some(name)
}

/// Whether `name` is a key that can only be observed on keydown/keyup
///
/// This is the reverse of [`named_key`] minus the keypad digits, which
/// keypress reports as ordinary characters.
pub fn is_named_key(name: &str) -> bool {
    matches!(
        name,
        "backspace"
            | "tab"
            | "enter"
            | "shift"
            | "ctrl"
            | "alt"
            | "capslock"
            | "esc"
            | "space"
            | "pageup"
            | "pagedown"
            | "end"
            | "home"
            | "left"
            | "up"
            | "right"
            | "down"
            | "ins"
            | "del"
            | "meta"
    ) || is_function_key(name)
}

fn is_function_key(name: &str) -> bool {
    name.strip_prefix('f')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=19).contains(&n))
        && !name.starts_with("f0")
}

/// Unshifted base key for a character that needs shift on a US layout
pub fn unshifted(symbol: &str) -> Option<&'static str> {
    let base = match symbol {
        "~" => "`",
        "!" => "1",
        "@" => "2",
        "#" => "3",
        "$" => "4",
        "%" => "5",
        "^" => "6",
        "&" => "7",
        "*" => "8",
        "(" => "9",
        ")" => "0",
        "_" => "-",
        "+" => "=",
        ":" => ";",
        "\"" => "'",
        "<" => ",",
        ">" => ".",
        "?" => "/",
        "|" => "\\",
        _ => return None,
    };
    Some(base)
}

/// Alternative names accepted in combination strings
///
/// `mod` is resolved separately because it depends on the platform.
pub fn alias(name: &str) -> Option<&'static str> {
    let resolved = match name {
        "option" => "alt",
        "command" => "meta",
        "return" => "enter",
        "escape" => "esc",
        "plus" => "+",
        _ => return None,
    };
    Some(resolved)
}

/// Whether a name produced by the parser can ever come out of the normalizer
pub fn is_known_key(name: &str) -> bool {
    name.chars().count() == 1 || is_named_key(name)
}
