//! The `statquiz profile` command.

use std::path::PathBuf;

use anyhow::Result;

use statquiz_core::records::UserProfile;

use super::open_store;

pub async fn execute(name: Option<String>, user: String, db: Option<PathBuf>) -> Result<()> {
    let store = open_store(db);

    match name {
        Some(name) => {
            let profile = UserProfile {
                user_id: user,
                user_name: Some(name.clone()),
            };
            store.put_user_profile(&profile).await?;
            println!("Saved display name: {name}");
        }
        None => match store.user_profile(&user).await? {
            Some(UserProfile {
                user_name: Some(name),
                ..
            }) => println!("Display name: {name}"),
            _ => println!("No display name set for '{user}'."),
        },
    }

    Ok(())
}
