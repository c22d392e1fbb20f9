mod common;
use common::TestServer;

const SEPARATOR: &str = "--------------------";

#[tokio::test]
async fn test_register_section_flow() -> anyhow::Result<()> {
    let server = TestServer::spawn(16871).await?;

    // 1. Alice teaches the bot a course
    let mut alice = server.connect("alice").await?;
    alice.send("ADD ae1000 Intro to Aerospace").await?;
    let reply = alice.recv().await?;
    assert_eq!(
        reply,
        "AE 1000 \"Intro to Aerospace\" has been added to my memory."
    );

    // 2. First registration creates a request
    alice.send("REGISTER ae1000").await?;
    let lines = alice.recv_until(|l| l == SEPARATOR).await?;
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("first person to request AE 1000"));
    assert!(lines[0].contains("Fall 2026"));

    // 3. Registering again is idempotent
    alice.send("REGISTER ae1000").await?;
    let lines = alice.recv_until(|l| l == SEPARATOR).await?;
    assert!(lines[0].contains("already requested AE 1000"));

    // 4. A second, distinct requester triggers section creation
    let mut bob = server.connect("bob").await?;
    bob.send("REGISTER AE1000").await?;
    let lines = bob.recv_until(|l| l == SEPARATOR).await?;
    assert!(lines[0].contains("bob - You have been added to AE 1000"));
    assert!(lines[0].contains("alice - You had previously requested"));

    // 5. A third requester simply joins the open section
    let mut carol = server.connect("carol").await?;
    carol.send("REGISTER ae1000").await?;
    let lines = carol.recv_until(|l| l == SEPARATOR).await?;
    assert!(lines[0].contains("You have been added to AE 1000 in the Fall 2026 semester."));

    // 6. The request was consumed: a new requester for a different term
    // starts fresh
    carol.send("REGISTER ae1000-sp27").await?;
    let lines = carol.recv_until(|l| l == SEPARATOR).await?;
    assert!(lines[0].contains("first person to request AE 1000"));
    assert!(lines[0].contains("Spring 2027"));

    Ok(())
}

#[tokio::test]
async fn test_unknown_courses_and_batches() -> anyhow::Result<()> {
    let server = TestServer::spawn(16872).await?;

    let mut alice = server.connect("alice").await?;
    alice.send("ADD ae8803-non Nonlinear Control Systems").await?;
    let _ = alice.recv().await?;

    // A batch mixing the known course, an unknown topic, an entirely
    // unknown course, and a malformed token: four lines, in order.
    alice
        .send("REGISTER ae8803-non, ae8803-xyz, zz9999, garbage")
        .await?;
    let lines = alice.recv_until(|l| l == SEPARATOR).await?;
    assert_eq!(lines.len(), 5);
    assert!(lines[0].contains("first person to request AE 8803-NON"));
    assert!(lines[1].contains("special topics course"));
    assert!(lines[2].contains("never heard of \"zz9999\""));
    assert!(lines[3].contains("did not understand \"garbage\""));

    Ok(())
}

#[tokio::test]
async fn test_limits_reporting() -> anyhow::Result<()> {
    let server = TestServer::spawn(16873).await?;

    let mut alice = server.connect("alice").await?;
    alice.send("LIMITS").await?;
    assert_eq!(alice.recv().await?, "Total rooms currently: 0");
    assert_eq!(alice.recv().await?, "Max sections remaining: 10");

    // Open one section and watch the numbers move.
    alice.send("ADD ae1000 Intro to Aerospace").await?;
    let _ = alice.recv().await?;
    alice.send("REGISTER ae1000").await?;
    let _ = alice.recv_until(|l| l == SEPARATOR).await?;

    let mut bob = server.connect("bob").await?;
    bob.send("REGISTER ae1000").await?;
    let _ = bob.recv_until(|l| l == SEPARATOR).await?;

    alice.send("LIMITS").await?;
    assert_eq!(alice.recv().await?, "Total rooms currently: 4");
    assert_eq!(alice.recv().await?, "Max sections remaining: 9");

    Ok(())
}

#[tokio::test]
async fn test_identification_required() -> anyhow::Result<()> {
    let server = TestServer::spawn(16874).await?;

    let mut stranger = server.connect_anonymous("stranger").await?;
    stranger.send("REGISTER ae1000").await?;
    let reply = stranger.recv().await?;
    assert!(reply.contains("Introduce yourself"));

    // HELLO fixes it.
    stranger.hello().await?;
    stranger.send("HELP").await?;
    let lines = stranger
        .recv_until(|l| l.contains("HELP - show this message"))
        .await?;
    assert!(lines.iter().any(|l| l.contains("REGISTER")));

    Ok(())
}
