//! 坐标系注册表示例
//!
//! 组一棵 6 轴臂的连杆树，演示层级查询和树形打印。
//!
//! 运行：`cargo run --example frame_registry`

use armkit::{SearchOrder, Tree};

fn main() {
    let mut tree = Tree::new();
    tree.insert("world", "fixed").unwrap();
    tree.insert_child(&"world", "base", "revolute").unwrap();
    tree.insert_child(&"base", "link1", "revolute").unwrap();
    tree.insert_child(&"link1", "link2", "revolute").unwrap();
    tree.insert_child(&"link2", "flange", "fixed").unwrap();
    tree.insert_child(&"flange", "gripper", "prismatic").unwrap();
    tree.insert_child(&"world", "camera", "fixed").unwrap();

    println!("frame tree:\n{tree}");

    println!(
        "gripper depth: {}",
        tree.depth(&"gripper").expect("gripper exists")
    );
    println!(
        "is world an ancestor of gripper? {}",
        tree.is_ancestor(&"world", &"gripper").unwrap()
    );
    println!(
        "is camera an ancestor of gripper? {}",
        tree.is_ancestor(&"camera", &"gripper").unwrap()
    );

    let chain: Vec<_> = tree.ancestors(&"gripper").map(|(k, _)| *k).collect();
    println!("kinematic chain (tip to root): {chain:?}");

    let reachable: Vec<_> = tree
        .descendants(&"base", SearchOrder::BreadthFirst, usize::MAX)
        .map(|(k, _)| *k)
        .collect();
    println!("frames moved by the base joint: {reachable:?}");
}
