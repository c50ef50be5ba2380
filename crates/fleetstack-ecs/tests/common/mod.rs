use fleetstack_cloud::{
    NamePostFix, OutputDefinition, Outputs, Reference, ResourceGraph, ResourceNamer,
};
use fleetstack_core::{ClusterSpec, ServiceSpec};
use fleetstack_ecs::{Cluster, NetworkContext, ServiceArgs, ServiceSynthesizer};
use serde_json::json;

/// Network with fixed answers, independent of `Vpc`
pub struct StubNetwork {
    pub existing: bool,
    pub subnets: Vec<Reference>,
    pub security_groups: Vec<Reference>,
}

impl StubNetwork {
    pub fn existing() -> Self {
        Self {
            existing: true,
            subnets: vec![
                Reference::literal("subnet-0a1"),
                Reference::literal("subnet-0b2"),
            ],
            security_groups: vec![
                Reference::literal("sg-0aaa"),
                Reference::literal("sg-0bbb"),
            ],
        }
    }

    pub fn new_network() -> Self {
        Self {
            existing: false,
            subnets: vec![Reference::to("StubSubnetA"), Reference::to("StubSubnetB")],
            security_groups: Vec::new(),
        }
    }
}

impl NetworkContext for StubNetwork {
    fn use_existing_network(&self) -> bool {
        self.existing
    }

    fn ref_name(&self) -> Reference {
        if self.existing {
            Reference::literal("vpc-0stub")
        } else {
            Reference::to("StubVPC")
        }
    }

    fn subnets(&self) -> Vec<Reference> {
        self.subnets.clone()
    }

    fn security_groups(&self) -> Vec<Reference> {
        self.security_groups.clone()
    }
}

/// Service that only contributes outputs
#[allow(dead_code)]
pub struct OutputOnlyService {
    namer: ResourceNamer,
    port: Option<u16>,
    outputs: Vec<(String, String)>,
}

impl OutputOnlyService {
    #[allow(dead_code)]
    pub fn factory(
        outputs: Vec<Vec<(&'static str, &'static str)>>,
    ) -> impl FnMut(ServiceArgs<'_>) -> Box<dyn ServiceSynthesizer> {
        let mut outputs = outputs.into_iter();
        move |args: ServiceArgs<'_>| -> Box<dyn ServiceSynthesizer> {
            let pairs = outputs
                .next()
                .unwrap_or_default()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Box::new(OutputOnlyService {
                namer: args.cluster_namer.child(&args.spec.name),
                port: args.spec.port,
                outputs: pairs,
            })
        }
    }
}

impl ServiceSynthesizer for OutputOnlyService {
    fn name(&self, postfix: NamePostFix) -> String {
        self.namer.name(postfix)
    }

    fn port(&self) -> Option<u16> {
        self.port
    }

    fn generate(&self, _cluster: &Cluster<'_>) -> fleetstack_ecs::Result<ResourceGraph> {
        Ok(ResourceGraph::new())
    }

    fn outputs(&self, _cluster: &Cluster<'_>) -> Outputs {
        self.outputs
            .iter()
            .fold(Outputs::new(), |outputs, (name, value)| {
                outputs.with(name.clone(), OutputDefinition::new(json!(value)))
            })
    }
}

pub fn web_service(port: u16) -> ServiceSpec {
    ServiceSpec::new("web", "registry.example.com/web:2.1.0").with_port(port)
}

pub fn cluster_spec(public: bool, services: Vec<ServiceSpec>) -> ClusterSpec {
    services
        .into_iter()
        .fold(ClusterSpec::new("shop").with_public(public), |spec, service| {
            spec.with_service(service)
        })
}
