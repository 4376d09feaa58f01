//! User model -> entity mapper

use stockbot_core::entities::User;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            line_user_id: model.line_user_id,
            display_name: model.display_name,
            is_active: model.is_active,
            reply_count: model.reply_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
