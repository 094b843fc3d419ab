use std::net::Ipv4Addr;
use std::sync::Arc;

use swarm_bench::domain::{CommandResult, TARGET_NAME};
use swarm_bench::provision::Provisioner;
use swarm_bench::testkit::config::{config, config_with_target_ip};
use swarm_bench::testkit::executor::ScriptedExecutor;

fn provisioner(config: swarm_bench::config::Config, executor: &Arc<ScriptedExecutor>) -> Provisioner {
    Provisioner::new(Arc::new(config), executor.clone()).with_streaming(false)
}

#[tokio::test]
async fn teardown_removes_every_cluster_machine_in_one_command() {
    let executor = Arc::new(ScriptedExecutor::new());
    let report = provisioner(config(3), &executor).teardown().await;

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].argv(),
        [
            "rm",
            "-f",
            "-y",
            "bench-kv-store",
            "bench-master",
            "bench-agent-1",
            "bench-agent-2",
            "bench-agent-3",
        ]
    );
    assert_eq!(report.machines.len(), 5);
    assert!(report.failure.is_none());
}

#[tokio::test]
async fn teardown_with_no_workers_removes_store_and_master() {
    let executor = Arc::new(ScriptedExecutor::new());
    let report = provisioner(config(0), &executor).teardown().await;
    assert_eq!(report.machines, ["bench-kv-store", "bench-master"]);
}

#[tokio::test]
async fn teardown_tolerates_missing_machines() {
    let executor = Arc::new(ScriptedExecutor::new());
    executor.respond(
        "rm",
        None,
        [CommandResult::new(1, "Error removing host \"bench-agent-3\": Host does not exist")],
    );
    let report = provisioner(config(3), &executor).teardown().await;

    let failure = report.failure.expect("failure recorded");
    assert_eq!(failure.status, 1);
    assert!(failure.output.contains("Host does not exist"));
}

#[tokio::test]
async fn teardown_never_touches_the_target() {
    let executor = Arc::new(ScriptedExecutor::new());
    provisioner(config(2), &executor).teardown().await;
    assert!(!executor.calls()[0].has_arg(TARGET_NAME));
}

#[tokio::test]
async fn target_teardown_removes_the_created_target() {
    let executor = Arc::new(ScriptedExecutor::new());
    let report = provisioner(config(2), &executor)
        .teardown_target()
        .await
        .expect("target removed");

    assert_eq!(report.machines, [TARGET_NAME]);
    assert_eq!(executor.calls()[0].argv(), ["rm", "-f", "-y", TARGET_NAME]);
}

#[tokio::test]
async fn target_teardown_leaves_a_configured_target_alone() {
    let executor = Arc::new(ScriptedExecutor::new());
    let report = provisioner(config_with_target_ip(2, Ipv4Addr::new(1, 2, 3, 4)), &executor)
        .teardown_target()
        .await;

    assert!(report.is_none());
    assert!(executor.calls().is_empty());
}
