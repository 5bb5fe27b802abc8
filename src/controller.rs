//! Read-more disclosure state for a set of content blocks.
//!
//! The controller owns the blocks handed to [`Controller::new`] and tracks, per block,
//! whether the preview or the full markup is showing and whether the show-more control
//! is visible. Rendering is up to the caller: it reads [`Controller::displayed`] and
//! [`Controller::control_visible`] after each event.
//!
//! Setup problems are never fatal. A block without a control, or whose markup does not
//! parse, is logged and left alone while the other blocks are set up normally.

use crate::config::Config;
use crate::truncate::Truncator;

/// A content block as found on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    markup: String,
    has_control: bool,
}

impl Block {
    pub fn new(markup: impl Into<String>) -> Self {
        Block {
            markup: markup.into(),
            has_control: true,
        }
    }

    /// A block that has no show-more control.
    #[must_use]
    pub fn without_control(mut self) -> Self {
        self.has_control = false;
        self
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn has_control(&self) -> bool {
        self.has_control
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    /// Skipped during setup; shows its markup as is.
    Unmanaged,
    Collapsed,
    Expanded,
}

/// Keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            " " | "Spacebar" => Key::Space,
            _ => Key::Other,
        }
    }
}

#[derive(Debug)]
struct Entry {
    block: Block,
    /// Truncated markup; `None` when the block fits or was skipped.
    preview: Option<String>,
    state: BlockState,
}

#[derive(Debug)]
pub struct Controller {
    entries: Vec<Entry>,
    focused: Option<usize>,
}

impl Controller {
    pub fn new(blocks: impl IntoIterator<Item = Block>, config: &Config) -> Self {
        let truncator = Truncator::from_config(config);
        let entries = blocks
            .into_iter()
            .enumerate()
            .map(|(index, block)| setup_block(index, block, &truncator))
            .collect();
        Controller {
            entries,
            focused: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.entries.iter().map(|e| &e.block)
    }

    pub fn state(&self, index: usize) -> Option<BlockState> {
        self.entries.get(index).map(|e| e.state)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.state(index) == Some(BlockState::Expanded)
    }

    /// Markup the block should currently show.
    pub fn displayed(&self, index: usize) -> Option<&str> {
        let entry = self.entries.get(index)?;
        Some(match (&entry.state, &entry.preview) {
            (BlockState::Collapsed, Some(preview)) => preview.as_str(),
            _ => entry.block.markup(),
        })
    }

    /// The show-more control is only shown while a block is collapsed.
    pub fn control_visible(&self, index: usize) -> bool {
        self.state(index) == Some(BlockState::Collapsed)
    }

    /// Pointer activation of a block's control. Returns `true` if the block expanded.
    pub fn click(&mut self, index: usize) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            tracing::warn!(index, "click on unknown block");
            return false;
        };
        if entry.state != BlockState::Collapsed {
            return false;
        }
        entry.state = BlockState::Expanded;
        tracing::debug!(index, "block expanded");
        true
    }

    /// Give keyboard focus to a block's control. Only a visible control can take focus.
    pub fn focus(&mut self, index: usize) {
        self.focused = Some(index).filter(|&i| self.control_visible(i));
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Enter or Space on a focused control activates it like a click.
    pub fn key_press(&mut self, key: Key) -> bool {
        match (key, self.focused) {
            (Key::Enter | Key::Space, Some(index)) => self.click(index),
            _ => false,
        }
    }

    /// Expand every collapsed block; returns how many changed.
    pub fn expand_all(&mut self) -> usize {
        (0..self.entries.len()).filter(|&i| self.click(i)).count()
    }

    /// Put every truncated block back into its collapsed preview.
    pub fn reset_all(&mut self) {
        for entry in &mut self.entries {
            if entry.preview.is_some() {
                entry.state = BlockState::Collapsed;
            }
        }
    }
}

fn setup_block(index: usize, block: Block, truncator: &Truncator) -> Entry {
    let unmanaged = |block| Entry {
        block,
        preview: None,
        state: BlockState::Unmanaged,
    };

    if !block.has_control() {
        tracing::warn!(index, "no read-more control found in block");
        return unmanaged(block);
    }

    match truncator.truncate(block.markup()) {
        Ok(out) if out.truncated => Entry {
            block,
            preview: Some(out.html),
            state: BlockState::Collapsed,
        },
        Ok(_) => Entry {
            block,
            preview: None,
            state: BlockState::Expanded,
        },
        Err(err) => {
            tracing::warn!(index, error = %err, "cannot truncate block, leaving it as is");
            unmanaged(block)
        }
    }
}
