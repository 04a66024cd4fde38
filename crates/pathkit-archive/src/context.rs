//! Purpose and origin of a decode, readable from inside `Deserialize` impls
//!
//! The decoder installs a [`DecodeContext`] for the duration of one
//! [`NativeDecoder::decode`](crate::NativeDecoder::decode) call. Types that
//! care, for example to ignore server-assigned fields when creating locally,
//! call [`DecodeContext::current`] from their own `Deserialize` impl. This
//! crate never looks at it.

use std::cell::Cell;

/// Why a value is being decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Purpose {
    #[default]
    Create,
    Update,
    Replace,
}

/// Where the decoded data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeContext {
    pub purpose: Purpose,
    pub origin: Origin,
}

thread_local! {
    static CURRENT: Cell<Option<DecodeContext>> = const { Cell::new(None) };
}

impl DecodeContext {
    pub fn new(purpose: Purpose, origin: Origin) -> Self {
        Self { purpose, origin }
    }

    /// The context of the decode running on this thread, if any.
    pub fn current() -> Option<DecodeContext> {
        CURRENT.with(Cell::get)
    }

    /// Install this context until the guard drops; nests correctly.
    pub(crate) fn enter(self) -> ContextGuard {
        let previous = CURRENT.with(|current| current.replace(Some(self)));
        ContextGuard { previous }
    }
}

pub(crate) struct ContextGuard {
    previous: Option<DecodeContext>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT.with(|current| current.set(self.previous));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_scoped_and_nested() {
        assert_eq!(DecodeContext::current(), None);

        let outer = DecodeContext::new(Purpose::Update, Origin::Remote);
        {
            let _outer = outer.enter();
            assert_eq!(DecodeContext::current(), Some(outer));
            {
                let _inner = DecodeContext::default().enter();
                assert_eq!(DecodeContext::current(), Some(DecodeContext::default()));
            }
            assert_eq!(DecodeContext::current(), Some(outer));
        }

        assert_eq!(DecodeContext::current(), None);
    }
}
