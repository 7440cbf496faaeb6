use boxed_avl::AvlTree;

fn print(tree: &AvlTree<u32>) {
    tree.assert_invariants();
    println!(
        "{:?} (root {:?}, height {})",
        tree.iter().collect::<Vec<_>>(),
        tree.root(),
        tree.height()
    );
}

fn main() {
    let mut tree: AvlTree<u32> = AvlTree::new();

    // Several of these insertions rotate part of the tree.
    for value in [30, 20, 10, 25, 27, 40, 50, 45] {
        tree.insert(value);
        print(&tree);
    }

    tree.delete(&20);
    print(&tree);

    tree.delete(&99);
    print(&tree);

    let mut dot = String::new();
    if tree.dotgraph("demo", &mut dot).is_ok() {
        println!("{dot}");
    }
}
