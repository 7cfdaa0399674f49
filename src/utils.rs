use bitflags::bitflags;

bitflags! {
    pub struct RegexFlags: u32 {
        const NO_FLAG = 0;
        const OPTIMIZE = 1 << 1;
        const DEBUG = 1 << 2;
    }
}

impl Default for RegexFlags {
    fn default() -> Self {
        RegexFlags::OPTIMIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_optimize() {
        let flags = RegexFlags::default();
        assert!(flags.intersects(RegexFlags::OPTIMIZE));
        assert!(!flags.intersects(RegexFlags::DEBUG));
        assert!(RegexFlags::NO_FLAG.is_empty());
    }
}
