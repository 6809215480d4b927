//! The 256-entry active-byte dispatch table.
//!
//! Each input byte maps to at most one inline recognizer. The table is
//! built once per render from the configured extensions. Unlike the C
//! source, this port's `Render` trait always provides every callback (with
//! a neutral default), so the table's gating is driven entirely by the
//! extension bitfield rather than by callback-presence checks — the
//! practical effect is identical, since the teacher binding itself always
//! registers every hoedown callback unconditionally.

use crate::extensions::Extension;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveChar {
    None,
    Emphasis,
    CodeSpan,
    LineBreak,
    Link,
    Image,
    Langle,
    Escape,
    Entity,
    AutolinkUrl,
    AutolinkEmail,
    AutolinkWww,
    Superscript,
}

pub struct ActiveTable([ActiveChar; 256]);

impl ActiveTable {
    pub fn build(extensions: Extension) -> ActiveTable {
        let mut table = [ActiveChar::None; 256];

        table[b'*' as usize] = ActiveChar::Emphasis;
        table[b'_' as usize] = ActiveChar::Emphasis;
        if extensions.contains(Extension::STRIKETHROUGH) {
            table[b'~' as usize] = ActiveChar::Emphasis;
        }

        table[b'`' as usize] = ActiveChar::CodeSpan;
        table[b'\n' as usize] = ActiveChar::LineBreak;
        table[b'[' as usize] = ActiveChar::Link;
        table[b'!' as usize] = ActiveChar::Image;
        table[b'<' as usize] = ActiveChar::Langle;
        table[b'\\' as usize] = ActiveChar::Escape;
        table[b'&' as usize] = ActiveChar::Entity;

        if extensions.contains(Extension::AUTOLINK) {
            table[b':' as usize] = ActiveChar::AutolinkUrl;
            table[b'@' as usize] = ActiveChar::AutolinkEmail;
            table[b'w' as usize] = ActiveChar::AutolinkWww;
        }

        if extensions.contains(Extension::SUPERSCRIPT) {
            table[b'^' as usize] = ActiveChar::Superscript;
        }

        ActiveTable(table)
    }

    pub fn get(&self, byte: u8) -> ActiveChar {
        self.0[byte as usize]
    }

    pub fn is_active(&self, byte: u8) -> bool {
        self.get(byte) != ActiveChar::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_bytes_always_active() {
        let table = ActiveTable::build(Extension::empty());
        assert_eq!(table.get(b'*'), ActiveChar::Emphasis);
        assert_eq!(table.get(b'`'), ActiveChar::CodeSpan);
        assert_eq!(table.get(b'['), ActiveChar::Link);
        assert_eq!(table.get(b'q'), ActiveChar::None);
    }

    #[test]
    fn autolink_gated_by_extension() {
        let without = ActiveTable::build(Extension::empty());
        assert_eq!(without.get(b'@'), ActiveChar::None);

        let with = ActiveTable::build(Extension::AUTOLINK);
        assert_eq!(with.get(b'@'), ActiveChar::AutolinkEmail);
        assert_eq!(with.get(b'w'), ActiveChar::AutolinkWww);
    }

    #[test]
    fn strikethrough_gates_tilde() {
        let without = ActiveTable::build(Extension::empty());
        assert_eq!(without.get(b'~'), ActiveChar::None);

        let with = ActiveTable::build(Extension::STRIKETHROUGH);
        assert_eq!(with.get(b'~'), ActiveChar::Emphasis);
    }
}
