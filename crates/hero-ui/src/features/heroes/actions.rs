//! Row actions and their display text.

use crate::features::heroes::state::FormMode;

/// Title of the delete confirmation.
pub const DELETE_CONFIRM_TITLE: &str = "删除英雄记录";
/// Body of the delete confirmation.
pub const DELETE_CONFIRM_BODY: &str = "确定删除这条英雄记录吗？";

/// Actions emitted from a table row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeroAction {
    /// Open the editor for the row.
    Edit {
        /// Record identifier.
        hero_id: String,
        /// Poster ids as listed, used to look up the full record.
        img_ids: String,
    },
    /// Delete the row after confirmation.
    Delete {
        /// Name the backend keys deletion by.
        hero_name: String,
    },
}

/// Toast text for a successful save.
#[must_use]
pub fn success_message(mode: FormMode) -> String {
    format!("{}英雄成功！", mode.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_messages_follow_mode() {
        assert_eq!(success_message(FormMode::Add), "新增英雄成功！");
        assert_eq!(success_message(FormMode::Update), "更新英雄成功！");
    }
}
