//! Property-based tests for token verification

use authgate::backend::auth::sessions::{MemoryRevocationList, TokenError, TokenService};
use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

fn service() -> TokenService {
    TokenService::new(
        b"proptest-secret",
        Duration::from_secs(3600),
        Arc::new(MemoryRevocationList::new()),
    )
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_arbitrary_strings_never_verify(token in "\\PC{0,200}") {
        let tokens = service();
        let result = runtime().block_on(tokens.verify(&token));
        prop_assert!(matches!(result, Err(TokenError::Invalid)));
    }

    #[test]
    fn test_issued_token_names_its_subject(bytes in any::<[u8; 16]>()) {
        let tokens = service();
        let user_id = Uuid::from_bytes(bytes);
        let issued = tokens.issue(user_id).unwrap();

        let subject = runtime().block_on(tokens.verify(&issued.token)).unwrap();
        prop_assert_eq!(subject, user_id);
    }

    #[test]
    fn test_altered_signature_never_verifies(index in 0usize..42) {
        let tokens = service();
        let issued = tokens.issue(Uuid::new_v4()).unwrap();

        let (head, signature) = issued.token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        // The last character carries padding bits
        let i = index % (chars.len() - 1);
        chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
        let forged = format!("{}.{}", head, chars.into_iter().collect::<String>());

        let result = runtime().block_on(tokens.verify(&forged));
        prop_assert!(matches!(result, Err(TokenError::Invalid)));
    }
}
