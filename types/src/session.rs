use secrecy::SecretString;
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE_NAME: &str = "dashgate_session";

/// Everything the server keeps about a signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub groups: Vec<String>,
    #[serde(with = "secret_string")]
    pub access_token: SecretString,
}

impl UserData {
    /// Group names from the identity provider may be qualified with a
    /// domain (`group@idm.example.com`); both forms match `group`.
    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g == group || g.split_once('@').is_some_and(|(name, _)| name == group))
    }

    pub fn is_in_any_group(&self, groups: &[String]) -> bool {
        groups.iter().any(|g| self.is_in_group(g))
    }

    pub fn current_user(&self) -> CurrentUser {
        CurrentUser {
            username: self.username.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// The part of a session that is safe to hand to the browser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    pub display_name: String,
}

impl CurrentUser {
    pub fn initial(&self) -> String {
        self.display_name
            .chars()
            .next()
            .unwrap_or('?')
            .to_uppercase()
            .to_string()
    }
}

mod secret_string {
    use secrecy::SecretString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use secrecy::ExposeSecret;
        serializer.serialize_str(secret.expose_secret())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(groups: &[&str]) -> UserData {
        UserData {
            user_id: "00000000-0000-0000-0000-000000000001".into(),
            username: "jsmith".into(),
            display_name: "john Smith".into(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
            access_token: "token".to_string().into(),
        }
    }

    #[test]
    fn group_membership_ignores_domain_suffix() {
        let user = user(&["dashgate_admin@idm.example.com", "staff"]);

        assert!(user.is_in_group("dashgate_admin"));
        assert!(user.is_in_group("staff"));
        assert!(!user.is_in_group("dashgate"));
        assert!(!user.is_in_group("idm.example.com"));
    }

    #[test]
    fn any_group_matches_one_of_many() {
        let user = user(&["events_crew@idm.example.com"]);

        assert!(user.is_in_any_group(&["trainers".into(), "events_crew".into()]));
        assert!(!user.is_in_any_group(&[]));
    }

    #[test]
    fn current_user_hides_token() {
        let current = user(&[]).current_user();
        assert_eq!(current.username, "jsmith");
        assert_eq!(current.initial(), "J");

        let json = serde_json::to_string(&current).unwrap();
        assert!(!json.contains("token"));
    }
}
