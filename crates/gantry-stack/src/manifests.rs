//! Kubernetes manifest literals for the sample workload

use serde_json::Value;

use crate::params::StackParams;

/// Sample workload Deployment.
pub fn deployment(params: &StackParams) -> anyhow::Result<Value> {
    let yaml = format!(
        r#"
apiVersion: apps/v1
kind: Deployment
metadata:
  name: hello-kubernetes
spec:
  replicas: {replicas}
  selector:
    matchLabels:
      app: hello-kubernetes
  template:
    metadata:
      labels:
        app: hello-kubernetes
    spec:
      containers:
        - name: hello-kubernetes
          image: {image}
          ports:
            - containerPort: {port}
"#,
        replicas = params.replicas,
        image = params.app_image,
        port = params.container_port,
    );
    Ok(serde_yaml::from_str(&yaml)?)
}

/// ClusterIP Service in front of the workload pods.
pub fn service(params: &StackParams) -> anyhow::Result<Value> {
    let yaml = format!(
        r#"
apiVersion: v1
kind: Service
metadata:
  name: hello-kubernetes
spec:
  type: ClusterIP
  ports:
    - port: {port}
      targetPort: {target_port}
  selector:
    app: hello-kubernetes
"#,
        port = params.service_port,
        target_port = params.container_port,
    );
    Ok(serde_yaml::from_str(&yaml)?)
}

/// TargetGroupBinding custom resource attaching the Service to a target
/// group.
///
/// The target group's identifier lands in the document as a plain string
/// token, so the document gives edge inference nothing to see — the stack
/// must pair this manifest with explicit `depends_on` declarations.
pub fn target_group_binding(
    params: &StackParams,
    target_group: &str,
) -> anyhow::Result<Value> {
    let arn_token = format!("${{{}.arn}}", target_group);
    let yaml = format!(
        r#"
apiVersion: elbv2.k8s.aws/v1beta1
kind: TargetGroupBinding
metadata:
  name: hello-kubernetes-tgb
spec:
  serviceRef:
    name: hello-kubernetes
    port: {port}
  targetGroupARN: {arn}
"#,
        port = params.service_port,
        arn = arn_token,
    );
    Ok(serde_yaml::from_str(&yaml)?)
}
