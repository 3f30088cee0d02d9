use musicfinder::types::MentionCandidate;
use musicfinder::utils::*;

// Helper function to create a test mention
fn create_test_mention(title: &str, artist: &str) -> MentionCandidate {
    MentionCandidate {
        title: title.to_string(),
        artist: artist.to_string(),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // Should not be empty
    assert!(!challenge.is_empty());

    // Should be deterministic - same input produces same output
    let challenge2 = generate_code_challenge(verifier);
    assert_eq!(challenge, challenge2);

    // Different input should produce different output
    let challenge3 = generate_code_challenge("different_verifier");
    assert_ne!(challenge, challenge3);

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_value() {
    // RFC 7636 appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_format_bytes() {
    assert_eq!(format_bytes(0), "—");
    assert_eq!(format_bytes(2048), "2 KB");
    assert_eq!(format_bytes(10 * 1024), "10 KB");
    assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
    assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MB");
}

#[test]
fn test_sanitize_filename_reserved_characters() {
    assert_eq!(sanitize_filename("AC/DC: Back in Black"), "AC_DC_ Back in Black");
    assert_eq!(sanitize_filename("What? <Why> | \"How\""), "What_ _Why_ _ _How_");
}

#[test]
fn test_sanitize_filename_whitespace() {
    assert_eq!(sanitize_filename("  lots   of\tspace  "), "lots of space");
}

#[test]
fn test_sanitize_filename_traversal() {
    let name = sanitize_filename("../../etc/passwd");
    assert!(!name.contains(".."));
    assert!(!name.contains('/'));
    assert!(!name.starts_with('.'));
}

#[test]
fn test_sanitize_filename_never_empty() {
    assert_eq!(sanitize_filename(""), "untitled");
    assert_eq!(sanitize_filename("   "), "untitled");
    assert_eq!(sanitize_filename("..."), "untitled");
}

#[test]
fn test_sanitize_filename_length_cap() {
    let long = "a".repeat(300);
    assert_eq!(sanitize_filename(&long).chars().count(), 120);

    // Multi-byte characters count as one
    let accented = "é".repeat(200);
    assert_eq!(sanitize_filename(&accented).chars().count(), 120);
}

#[test]
fn test_truncate_to_bytes() {
    let mut short = String::from("abc");
    truncate_to_bytes(&mut short, 10);
    assert_eq!(short, "abc");

    let mut exact = String::from("abcdef");
    truncate_to_bytes(&mut exact, 3);
    assert_eq!(exact, "abc");

    // "é" is two bytes; cutting inside it backs off to the previous boundary
    let mut accented = String::from("héllo");
    truncate_to_bytes(&mut accented, 2);
    assert_eq!(accented, "h");
}

#[test]
fn test_mention_table_rows() {
    let mentions = vec![
        create_test_mention("Nevermind", "Nirvana"),
        create_test_mention("Thriller", "Michael Jackson"),
    ];

    let rows = mention_table_rows(&mentions);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].artist, "Nirvana");
    assert_eq!(rows[0].title, "Nevermind");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].artist, "Michael Jackson");
}

#[test]
fn test_mention_table_rows_empty() {
    assert!(mention_table_rows(&[]).is_empty());
}
