use std::time::{Duration, Instant};

use healthdash::{Health, HttpProber, Scheduler, Target};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_with(route: &str, delay_ms: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(delay_ms)))
        .mount(&server)
        .await;
    server
}

#[tokio::test(flavor = "multi_thread")]
async fn test_first_cycle_runs_immediately() {
    let server = server_with("/", 0).await;
    let prober = HttpProber::new(Duration::from_secs(1)).unwrap();
    let scheduler = Scheduler::new(
        prober,
        vec![Target::new(&server.uri())],
        Duration::from_secs(30),
    )
    .with_max_cycles(Some(1));

    let started = Instant::now();
    let mut seen = 0;
    let done = scheduler
        .run(std::future::pending::<()>(), |cycle, _| {
            assert_eq!(cycle.len(), 1);
            seen += 1;
        })
        .await;
    assert_eq!(done, 1);
    assert_eq!(seen, 1);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cycles_are_spaced_by_interval() {
    let server = server_with("/", 0).await;
    let prober = HttpProber::new(Duration::from_millis(200)).unwrap();
    let interval = Duration::from_millis(300);
    let scheduler =
        Scheduler::new(prober, vec![Target::new(&server.uri())], interval).with_max_cycles(Some(3));

    let started = Instant::now();
    let mut health = Vec::new();
    let done = scheduler
        .run(std::future::pending::<()>(), |cycle, _| {
            health.push(cycle.results()[0].health(Duration::from_millis(500)));
        })
        .await;

    assert_eq!(done, 3);
    assert!(started.elapsed() >= interval * 2);
    assert_eq!(health, vec![Health::Healthy; 3]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_interrupts_cycle_in_flight() {
    let server = server_with("/hang", 10_000).await;
    let prober = HttpProber::new(Duration::from_secs(2)).unwrap();
    let scheduler = Scheduler::new(
        prober,
        vec![Target::new(&format!("{}/hang", server.uri()))],
        Duration::from_secs(3),
    );

    let started = Instant::now();
    let done = scheduler
        .run(tokio::time::sleep(Duration::from_millis(200)), |_, _| {
            panic!("no cycle should complete");
        })
        .await;
    assert_eq!(done, 0);
    assert!(started.elapsed() < Duration::from_secs(1));
}
