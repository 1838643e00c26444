//! The demo stack — cluster, controller, load balancer, workload, alarm

use gantry_core::{PropValue, ResourceNode};
use std::collections::BTreeMap;

use crate::builders::{
    Alarm, Cluster, HelmRelease, Listener, LoadBalancer, Manifest, Output, ServiceAccount,
    TargetGroup,
};
use crate::iam::controller_policy_statements;
use crate::manifests;
use crate::params::StackParams;

/// Logical names of the stack's fixed nodes.
pub const SERVICE_ACCOUNT: &str = "alb-controller-sa";
pub const CONTROLLER: &str = "alb-controller";
pub const LOAD_BALANCER: &str = "hello-lb";
pub const LISTENER: &str = "hello-listener";
pub const TARGET_GROUP: &str = "hello-tg";
pub const ALARM: &str = "hello-conn-alarm";
pub const WORKLOAD: &str = "hello-workload";
pub const BINDING: &str = "hello-binding";
pub const ALB_CNAME: &str = "alb-cname";

/// Declare the full demo stack. Pure — nothing here talks to a cloud API;
/// the external engine converges the declared state on apply.
pub fn demo_stack(params: &StackParams) -> anyhow::Result<Vec<ResourceNode>> {
    let cluster_name = params.cluster_name.as_str();

    let cluster = Cluster::new(cluster_name)
        .version(&params.kubernetes_version)
        .build();

    let service_account = ServiceAccount::new(SERVICE_ACCOUNT)
        .account_name("aws-load-balancer-controller")
        .namespace("kube-system")
        .cluster(cluster_name)
        .policy(controller_policy_statements())
        .build();

    let mut sa_value = BTreeMap::new();
    sa_value.insert("create".to_string(), PropValue::Bool(false));
    sa_value.insert(
        "name".to_string(),
        PropValue::reference(SERVICE_ACCOUNT, "account_name"),
    );
    let controller = HelmRelease::new(CONTROLLER)
        .chart("aws-load-balancer-controller")
        .repository("https://aws.github.io/eks-charts")
        .release("demo")
        .namespace("kube-system")
        .cluster(cluster_name)
        .value("clusterName", PropValue::reference(cluster_name, "name"))
        .value("serviceAccount", PropValue::Map(sa_value))
        .build();

    let load_balancer = LoadBalancer::new(LOAD_BALANCER)
        .vpc(cluster_name)
        .internet_facing(true)
        .build();

    let target_group = TargetGroup::new(TARGET_GROUP)
        .port(params.container_port)
        .target_type("ip")
        .vpc(cluster_name)
        .build();

    let listener = Listener::new(LISTENER)
        .load_balancer(LOAD_BALANCER)
        .port(params.listener_port)
        .open(true)
        .default_target_group(TARGET_GROUP)
        .build();

    let alarm = Alarm::new(ALARM)
        .metric("ActiveConnectionCount")
        .load_balancer(LOAD_BALANCER)
        .threshold(params.alarm_threshold)
        .evaluation_periods(params.alarm_evaluation_periods)
        .build();

    let workload = Manifest::new(WORKLOAD)
        .cluster(cluster_name)
        .document(manifests::deployment(params)?)
        .document(manifests::service(params)?)
        .build();

    // The binding document embeds the target group identifier inside an
    // opaque payload, and the TargetGroupBinding kind only exists once the
    // controller release has registered it. Neither ordering is visible to
    // inference, so both are declared explicitly.
    let binding = Manifest::new(BINDING)
        .cluster(cluster_name)
        .document(manifests::target_group_binding(params, TARGET_GROUP)?)
        .depends_on(CONTROLLER)
        .depends_on(TARGET_GROUP)
        .build();

    let output = Output::new(ALB_CNAME)
        .value(LOAD_BALANCER, "dns_name")
        .build();

    Ok(vec![
        cluster,
        service_account,
        controller,
        load_balancer,
        target_group,
        listener,
        alarm,
        workload,
        binding,
        output,
    ])
}
