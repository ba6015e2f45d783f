// Inbound routing over a real socket

use client::domain::PLAY_ALL_KEY;
use client::view::elements::ElementId;
use client::view::{GameOutcome, ViewEvent};
use client::ws::Dispatched;
use client::{ClientEvent, RecordingView};
use client_test_support::frames;

use crate::support::mock_server::{MockServer, ServerConn};
use crate::support::{test_client, TestClient, WAIT};

type Started = (MockServer, TestClient, RecordingView, ServerConn);

/// Client with an open channel whose `start_game` has been consumed.
async fn started() -> Result<Started, Box<dyn std::error::Error>> {
    let mut server = MockServer::start().await?;
    let (mut client, view) = test_client(server.url());
    client.open().await?;
    let mut conn = server.next_connection(WAIT).await?;
    conn.recv_event(WAIT).await?;
    view.take();
    Ok((server, client, view, conn))
}

#[tokio::test]
async fn player_lost_renders_final_state_then_notice() -> Result<(), Box<dyn std::error::Error>> {
    let (_server, mut client, view, mut conn) = started().await?;

    conn.send(&frames::frame(
        "player_lost",
        frames::snapshot(&[], &["Scout"], &["Cutter"]),
    ))
    .await?;
    let outcome = client.process_next().await?;

    assert_eq!(outcome, Some(Dispatched::GameOver(GameOutcome::Lost)));
    let events = view.events();
    assert_eq!(events.len(), 2);
    let ViewEvent::State(snapshot) = &events[0] else {
        panic!("expected the final state first, got {events:?}");
    };
    assert_eq!(snapshot.player.discard_pile.len(), 1);
    assert_eq!(events[1], ViewEvent::GameOver(GameOutcome::Lost));
    Ok(())
}

#[tokio::test]
async fn actions_resolve_to_server_keys() -> Result<(), Box<dyn std::error::Error>> {
    let (_server, mut client, _view, mut conn) = started().await?;

    conn.send(&frames::game_state(&["Scout", "Viper"], &[], &["Cutter"]))
        .await?;
    conn.send(&frames::choose_action(&[
        ("10", "buy Explorer"),
        ("11", "play Viper"),
        ("12", "turn done"),
    ]))
    .await?;
    client.process_next().await?;
    assert_eq!(
        client.process_next().await?,
        Some(Dispatched::ActionsOffered {
            count: 3,
            play_all: true
        })
    );

    client.activate(&ElementId::TradeRowCard(0)).await?;
    client.activate(&ElementId::HandCard(1)).await?;
    client.activate(&ElementId::HandCard(0)).await?;
    client.activate(&ElementId::PlayAll).await?;

    let mut sent = Vec::new();
    for _ in 0..3 {
        sent.push(conn.recv_event(WAIT).await?);
    }
    assert_eq!(
        sent,
        vec![
            ClientEvent::ChooseAction {
                action: "10".into()
            },
            ClientEvent::ChooseAction {
                action: "11".into()
            },
            ClientEvent::ChooseAction {
                action: PLAY_ALL_KEY.into()
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn malformed_frame_is_dropped_and_the_next_one_applies(
) -> Result<(), Box<dyn std::error::Error>> {
    let (_server, mut client, view, mut conn) = started().await?;

    conn.send(r#"["game_state"]"#).await?;
    conn.send(r#"["status","still here"]"#).await?;

    let err = client.process_next().await.unwrap_err();
    assert_eq!(err.code(), "MALFORMED_ENVELOPE");
    assert!(client.session().snapshot().is_none());

    assert_eq!(client.process_next().await?, Some(Dispatched::Status));
    assert_eq!(view.events(), vec![ViewEvent::Status("still here".into())]);
    Ok(())
}

#[tokio::test]
async fn unknown_events_are_ignored() -> Result<(), Box<dyn std::error::Error>> {
    let (_server, mut client, view, mut conn) = started().await?;

    conn.send(&frames::frame("chat", serde_json::json!({"text": "gg"})))
        .await?;

    assert_eq!(client.process_next().await?, Some(Dispatched::Ignored));
    assert!(view.events().is_empty());
    assert!(client.is_open());
    Ok(())
}
