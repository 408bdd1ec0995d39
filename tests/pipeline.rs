use social_graph_analyzer::cluster::metrics;
use social_graph_analyzer::recommend::adamic_adar;
use social_graph_analyzer::{
    data, degree_centrality, predict_links, recommend_content, recommend_friends,
    ContentInteractions, Louvain, Partition, SocialGraph,
};

const EDGES: &str = "\
# two triangles joined by a bridge
1 2
2 3
1 3
4 5
5 6
4 6
3 4
";

fn two_triangles() -> SocialGraph {
    data::parse_edge_list(EDGES.as_bytes()).unwrap()
}

#[test]
fn test_two_triangles_split_into_two_communities() {
    let graph = two_triangles();
    let detection = Louvain::new().detect(&graph).unwrap();
    let partition = &detection.partition;

    assert!(detection.converged);
    assert_eq!(partition.len(), 6);
    assert_eq!(partition.community_count(), 2);
    assert_eq!(partition.communities(), vec![vec![1, 2, 3], vec![4, 5, 6]]);

    let baseline = metrics::modularity(&graph, &Partition::singletons(&graph)).unwrap();
    assert!(detection.modularity >= baseline);
}

#[test]
fn test_star_centrality() {
    let graph = SocialGraph::from_edges((1..=5).map(|leaf| (100, leaf))).unwrap();
    let centrality = degree_centrality(&graph);

    assert!((centrality.get(100).unwrap() - 1.0).abs() < 1e-12);
    for leaf in 1..=5 {
        assert!((centrality.get(leaf).unwrap() - 0.2).abs() < 1e-12);
    }
}

#[test]
fn test_content_recommendation_scenario() {
    let graph = two_triangles();
    let partition = Louvain::new().detect(&graph).unwrap().partition;
    assert_eq!(
        partition.community_of(1).unwrap(),
        partition.community_of(2).unwrap()
    );

    let interactions: ContentInteractions =
        vec![(1, vec!["A", "B"]), (2, vec!["A"])].into_iter().collect();
    let recs = recommend_content(1, &partition, &interactions, 2).unwrap();
    assert_eq!(recs, vec!["A".to_string(), "B".to_string()]);
}

#[test]
fn test_friend_recommendations_exclude_known_users() {
    let graph = two_triangles();
    let partition = Louvain::new().detect(&graph).unwrap().partition;
    let centrality = degree_centrality(&graph);

    for user in graph.nodes() {
        let first = recommend_friends(user, &graph, &partition, &centrality, 5).unwrap();
        let second = recommend_friends(user, &graph, &partition, &centrality, 5).unwrap();
        assert_eq!(first, second);
        assert!(!first.contains(&user));
        assert!(graph.neighbors(user).unwrap().all(|n| !first.contains(&n)));
    }
}

#[test]
fn test_adamic_adar_path() {
    let graph = data::parse_edge_list("1 2\n2 3\n".as_bytes()).unwrap();

    let score = adamic_adar(&graph, 1, 3).unwrap();
    assert!((score - 1.0 / 2f64.ln()).abs() < 1e-12);
    assert_eq!(adamic_adar(&graph, 1, 2).unwrap(), 0.0);
    assert_eq!(adamic_adar(&graph, 3, 1).unwrap(), score);

    // Adjacent nodes are ranked too, after any positive score
    assert_eq!(predict_links(&graph, 1, 5).unwrap(), vec![3, 2]);
}
