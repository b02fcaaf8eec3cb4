//! This module provides the in-memory tree engine: an arena of nodes plus
//! the full namespace operation surface built on a single path resolver.

use std::collections::VecDeque;

use globset::Glob;

use crate::core::{FsError, Result};
use crate::vfs::node::{Node, NodeId, NodeKind};
use crate::vfs::path::split_dir_and_name;

/// Upper bound on `_1`, `_2`, ... suffix attempts while de-duplicating a
/// name during copy. Running into it means the bound itself needs raising,
/// which is a misconfiguration rather than a caller mistake, hence the
/// panic instead of an `FsError`.
const RENAME_ATTEMPTS_MAX: usize = 1000;

/// An in-memory hierarchical namespace with POSIX-like path semantics.
///
/// `TreeFS` keeps a whole directory tree in process memory: no backing
/// storage, no I/O. Paths may be absolute (leading `/`) or relative to the
/// current working directory, and `.`/`..`/repeated slashes resolve the
/// way a shell would resolve them.
///
/// ### Internal state
///
/// * `nodes` — the arena. Every node lives in a slot addressed by a
///   `NodeId`; removal returns slots to `free` for reuse.
/// * `root` — the root directory. Its name is empty and it is its own
///   parent, which terminates every upward walk.
/// * `cwd` — Current Working Directory, the node relative paths resolve
///   against. Changed via `cd()`; reset to `root` if the node it points
///   at is removed.
///
/// ### Invariants
///
/// 1. A name appears at most once among the direct children of any
///    directory; listing order is insertion order.
/// 2. Every reachable node except the root is listed by exactly one
///    parent, and `parent` always points back at that directory.
/// 3. Auto-vivification only ever creates directories, never files.
///
/// ### Thread safety
///
/// Not thread-safe. Move and copy are multi-step mutations, so concurrent
/// use needs an exclusive lock around the whole value (e.g.
/// `Arc<Mutex<TreeFS>>`) at the application level.
///
/// ### Example
///
/// ```
/// use treefs_kit::TreeFS;
///
/// let mut fs = TreeFS::new();
/// fs.mkdir("/docs").unwrap();
/// fs.mkfile("/docs/note.txt", Some("Hello")).unwrap();
///
/// assert!(fs.exists("/docs/note.txt"));
/// assert_eq!(fs.read("/docs/note.txt").unwrap(), "Hello");
///
/// fs.rm("/docs").unwrap();
/// assert!(!fs.exists("/docs/note.txt"));
/// ```
pub struct TreeFS {
    nodes: Vec<Node>,   // arena; slots addressed by NodeId
    free: Vec<NodeId>,  // recycled arena slots
    root: NodeId,
    cwd: NodeId,
}

impl Default for TreeFS {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeFS {
    /// Creates a new namespace holding only the root directory.
    /// The current working directory starts at `/`.
    pub fn new() -> Self {
        let root = NodeId(0);
        Self {
            nodes: vec![Node::directory(String::new(), root)],
            free: Vec::new(),
            root,
            cwd: root,
        }
    }

    /// Changes the current working directory.
    /// * `path` can be relative or absolute, but must name an existing
    ///   directory; an error is returned otherwise.
    pub fn cd(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        if !self.node(target).is_dir() {
            return Err(FsError::InvalidPathComponent(format!(
                "{path} is not a directory"
            )));
        }
        self.cwd = target;
        Ok(())
    }

    /// Returns the absolute path of the current working directory.
    /// The root's own path is `/`.
    pub fn pwd(&self) -> String {
        self.path_of(self.cwd)
    }

    /// Lists the current working directory: child names in insertion
    /// order, directory names suffixed with `/`.
    pub fn ls(&self) -> Vec<String> {
        self.node(self.cwd)
            .children()
            .iter()
            .map(|&child| {
                let child = self.node(child);
                if child.is_dir() {
                    format!("{}/", child.name())
                } else {
                    child.name().to_string()
                }
            })
            .collect()
    }

    /// Creates a directory, along with every missing intermediate
    /// directory on the way. Creating an already-existing directory is a
    /// no-op; an existing file in any position of the path is an error.
    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        let target = self.resolve_or_create(path)?;
        if !self.node(target).is_dir() {
            return Err(FsError::InvalidPathComponent(format!(
                "{path} is not a directory"
            )));
        }
        Ok(())
    }

    /// Creates a file, auto-creating the directory chain leading to it.
    ///
    /// * `path` must end in a file name: a trailing slash or a reserved
    ///   (`.`/`..`) last component is an error.
    /// * A same-named entry under the target directory is replaced in
    ///   place, whatever its kind. Name de-duplication applies to copy
    ///   only, never to direct creation.
    /// * `content` of `None` creates an empty file.
    pub fn mkfile(&mut self, path: &str, content: Option<&str>) -> Result<()> {
        let (dir_path, name) = split_dir_and_name(path);
        let Some(name) = name else {
            return Err(FsError::InvalidPathComponent(format!(
                "{path} does not name a file"
            )));
        };

        let dir = self.resolve_or_create(&dir_path)?;
        if !self.node(dir).is_dir() {
            return Err(FsError::InvalidPathComponent(format!(
                "{dir_path} is not a directory"
            )));
        }

        let content = content.unwrap_or_default().to_string();
        let file = self.alloc(Node::file(name, dir, content));
        self.attach(dir, file);
        Ok(())
    }

    /// Reads the entire content of a file.
    pub fn read(&self, path: &str) -> Result<String> {
        let target = self.resolve(path)?;
        match self.node(target).kind() {
            NodeKind::File { content } => Ok(content.clone()),
            NodeKind::Directory { .. } => Err(FsError::InvalidPathComponent(format!(
                "{path} is a directory"
            ))),
        }
    }

    /// Replaces the entire content of an existing file.
    /// The file must exist already (use `mkfile()` first).
    pub fn write(&mut self, path: &str, content: &str) -> Result<()> {
        let cell = self.file_content_mut(path)?;
        cell.clear();
        cell.push_str(content);
        Ok(())
    }

    /// Appends to the end of an existing file, preserving its content.
    pub fn append(&mut self, path: &str, content: &str) -> Result<()> {
        self.file_content_mut(path)?.push_str(content);
        Ok(())
    }

    /// Checks whether `path` resolves to an existing node.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    /// Checks if `path` is a directory.
    pub fn is_dir(&self, path: &str) -> Result<bool> {
        Ok(self.node(self.resolve(path)?).is_dir())
    }

    /// Checks if `path` is a regular file.
    pub fn is_file(&self, path: &str) -> Result<bool> {
        Ok(self.node(self.resolve(path)?).is_file())
    }

    /// Removes a file or directory. A directory is removed with all of
    /// its contents; the root cannot be removed. If the current working
    /// directory was inside the removed subtree it resets to the root.
    pub fn rm(&mut self, path: &str) -> Result<()> {
        let target = self.resolve(path)?;
        self.unlink(target)?;
        self.release(target);
        Ok(())
    }

    /// Moves a file or directory to a new location and/or name.
    ///
    /// If `to` names an existing directory, the source moves into it and
    /// keeps its name. Otherwise the directory part of `to` is the
    /// destination (missing directories are created) and its last
    /// component becomes the new name. An existing same-named entry at
    /// the destination is silently replaced.
    ///
    /// Moving the root, or moving a directory into its own subtree, is an
    /// `InvalidOperation`.
    pub fn mv(&mut self, from: &str, to: &str) -> Result<()> {
        let source = self.resolve(from)?;
        let (dest, name) = self.transfer_target(source, to)?;

        if dest == source || self.is_inside(dest, source) {
            return Err(FsError::InvalidOperation(format!(
                "cannot move {from} into its own subtree"
            )));
        }

        self.unlink(source)?;
        // renaming is safe here: the node is detached, so no child list
        // refers to it while its name changes
        self.node_mut(source).name = name;
        self.attach(dest, source);
        Ok(())
    }

    /// Copies a file or a whole directory tree.
    ///
    /// The destination is decided the same way as for `mv()`. The copy is
    /// breadth-first over an explicit worklist, so arbitrarily deep trees
    /// copy without growing the call stack. At every level the inserted
    /// name runs through de-duplication: a taken name gets the first free
    /// `_1`, `_2`, ... suffix. The decided target name applies to the
    /// top-level copy only; deeper entries keep their own names.
    ///
    /// Copying a directory into its own subtree is an `InvalidOperation`
    /// (it could never terminate); copying it into its parent, or a file
    /// over itself, lands beside the original under a de-duplicated name.
    pub fn cp(&mut self, from: &str, to: &str) -> Result<()> {
        let source = self.resolve(from)?;
        let (dest, top_name) = self.transfer_target(source, to)?;

        if self.is_inside(dest, source) {
            return Err(FsError::InvalidOperation(format!(
                "cannot copy {from} into its own subtree"
            )));
        }

        let mut pending = VecDeque::new();
        pending.push_back((source, dest, Some(top_name)));

        while let Some((original, into, forced_name)) = pending.pop_front() {
            let candidate = match forced_name {
                Some(name) => name,
                None => self.node(original).name().to_string(),
            };
            let name = self.vacant_name(into, &candidate);

            // snapshot before attaching, so the fresh copy can never end
            // up enqueued as its own source
            let children: Vec<NodeId> = self.node(original).children().to_vec();

            let copy = match self.node(original).kind() {
                NodeKind::Directory { .. } => Node::directory(name, into),
                NodeKind::File { content } => Node::file(name, into, content.clone()),
            };
            let copy = self.alloc(copy);
            self.push_child(into, copy);

            for child in children {
                pending.push_back((child, copy, None));
            }
        }
        Ok(())
    }

    /// Finds every node named exactly `name` under the current working
    /// directory (itself included). Paths are relative to the starting
    /// point, whose own segment is `.`; sibling order is unspecified.
    pub fn find(&self, name: &str) -> Vec<String> {
        self.search(|candidate| candidate == name)
    }

    /// Like `find()`, but matches names against a glob pattern
    /// (`*.txt`, `report_?`, ...).
    pub fn find_matching(&self, pattern: &str) -> Result<Vec<String>> {
        let matcher = Glob::new(pattern)
            .map_err(|e| FsError::InvalidPattern(e.to_string()))?
            .compile_matcher();
        Ok(self.search(|candidate| matcher.is_match(candidate)))
    }

    /// Returns the absolute path of every entry below `path`, preorder.
    /// The starting directory itself is not included.
    pub fn tree(&self, path: &str) -> Result<Vec<String>> {
        let start = self.resolve(path)?;
        let mut stack: Vec<NodeId> = self.node(start).children().iter().rev().copied().collect();
        let mut entries = Vec::new();
        while let Some(next) = stack.pop() {
            entries.push(self.path_of(next));
            stack.extend(self.node(next).children().iter().rev());
        }
        Ok(entries)
    }

    // ---- resolution ----------------------------------------------------

    /// Resolves `path` to a node. No part of the tree is created.
    fn resolve(&self, path: &str) -> Result<NodeId> {
        let (mut current, components) = self.resolve_start(path)?;
        let Some(components) = components else {
            return Ok(current); // bare "/"
        };
        let last = components.len() - 1;
        for (idx, &component) in components.iter().enumerate() {
            match self.step(current, component, idx == last)? {
                Some(next) => current = next,
                None => return Err(self.not_found(component, current)),
            }
        }
        Ok(current)
    }

    /// Resolves `path` to a node, creating an empty directory for every
    /// missing component on the way. Never creates files.
    fn resolve_or_create(&mut self, path: &str) -> Result<NodeId> {
        let (mut current, components) = self.resolve_start(path)?;
        let Some(components) = components else {
            return Ok(current);
        };
        let last = components.len() - 1;
        for (idx, &component) in components.iter().enumerate() {
            match self.step(current, component, idx == last)? {
                Some(next) => current = next,
                None => {
                    let child = self.alloc(Node::directory(component.to_string(), current));
                    self.push_child(current, child);
                    current = child;
                }
            }
        }
        Ok(current)
    }

    /// Decides the starting node and the component list for a walk.
    /// `None` components means the path was exactly `/`.
    fn resolve_start<'p>(&self, path: &'p str) -> Result<(NodeId, Option<Vec<&'p str>>)> {
        if path.is_empty() {
            return Err(FsError::InvalidPathComponent("empty path".to_string()));
        }
        match path.strip_prefix('/') {
            Some("") => Ok((self.root, None)),
            Some(rest) => Ok((self.root, Some(rest.split('/').collect()))),
            None => Ok((self.cwd, Some(path.split('/').collect()))),
        }
    }

    /// Applies one path component to `current`. `Ok(None)` means the
    /// component names a missing child, which the two resolve flavors
    /// handle differently.
    fn step(&self, current: NodeId, component: &str, is_last: bool) -> Result<Option<NodeId>> {
        match component {
            // empty components make consecutive slashes transparent
            "" | "." => Ok(Some(current)),
            // the root is its own parent, so `..` at the root stays put
            ".." => Ok(Some(self.node(current).parent())),
            name => match self.child_by_name(current, name) {
                Some(child) => {
                    // only the final component may be a file
                    if !is_last && self.node(child).is_file() {
                        return Err(FsError::InvalidPathComponent(format!(
                            "{name} is not a directory"
                        )));
                    }
                    Ok(Some(child))
                }
                None => Ok(None),
            },
        }
    }

    /// Decides the destination directory and final name for a move/copy.
    ///
    /// `to` naming an existing directory means "into that directory, keep
    /// the source's name". Otherwise the directory part of `to` is the
    /// destination (created as needed) and its last component, when
    /// present, is the new name.
    fn transfer_target(&mut self, source: NodeId, to: &str) -> Result<(NodeId, String)> {
        match self.resolve(to) {
            Ok(node) if self.node(node).is_dir() => {
                return Ok((node, self.node(source).name().to_string()));
            }
            // an existing file at `to` is treated like an absent entry:
            // its name becomes the candidate name below
            Ok(_) | Err(FsError::PathComponentNotFound { .. }) => {}
            Err(other) => return Err(other),
        }

        let (dir_path, name) = split_dir_and_name(to);
        let dest = self.resolve_or_create(&dir_path)?;
        if !self.node(dest).is_dir() {
            return Err(FsError::InvalidPathComponent(format!(
                "{dir_path} is not a directory"
            )));
        }
        let name = match name {
            Some(name) => name,
            None => self.node(source).name().to_string(),
        };
        Ok((dest, name))
    }

    // ---- arena ---------------------------------------------------------

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Places `node` into a recycled slot, or grows the arena.
    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.index()] = node;
                id
            }
            None => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(node);
                id
            }
        }
    }

    fn children_mut(&mut self, dir: NodeId) -> &mut Vec<NodeId> {
        match &mut self.nodes[dir.index()].kind {
            NodeKind::Directory { children } => children,
            // callers verify directory-ness; a file here is an engine bug
            NodeKind::File { .. } => unreachable!("children_mut on a file node"),
        }
    }

    fn child_by_name(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.node(dir)
            .children()
            .iter()
            .copied()
            .find(|&child| self.node(child).name() == name)
    }

    /// Appends `child` to `dir`. The caller guarantees the name is not
    /// taken (freshly de-duplicated or auto-created).
    fn push_child(&mut self, dir: NodeId, child: NodeId) {
        self.node_mut(child).parent = dir;
        self.children_mut(dir).push(child);
    }

    /// Inserts `child` under `dir`. A same-named entry is replaced in its
    /// slot (the listing position is kept) and its subtree released.
    fn attach(&mut self, dir: NodeId, child: NodeId) {
        self.node_mut(child).parent = dir;
        let name = self.node(child).name().to_string();
        match self.child_index(dir, &name) {
            Some(slot) => {
                let replaced = std::mem::replace(&mut self.children_mut(dir)[slot], child);
                self.release(replaced);
            }
            None => self.children_mut(dir).push(child),
        }
    }

    fn child_index(&self, dir: NodeId, name: &str) -> Option<usize> {
        self.node(dir)
            .children()
            .iter()
            .position(|&child| self.node(child).name() == name)
    }

    /// Detaches `id` from its parent's child list, keeping the node alive
    /// (`mv` reattaches it elsewhere). Detaching the root is forbidden.
    fn unlink(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(FsError::InvalidOperation(
                "the root directory cannot be removed".to_string(),
            ));
        }
        let parent = self.node(id).parent();
        self.children_mut(parent).retain(|&child| child != id);
        Ok(())
    }

    /// Returns every arena slot of the subtree at `id` (inclusive) to the
    /// free list. A current working directory inside the subtree resets
    /// to the root.
    fn release(&mut self, id: NodeId) {
        let mut worklist = vec![id];
        while let Some(next) = worklist.pop() {
            if next == self.cwd {
                self.cwd = self.root;
            }
            worklist.extend(self.node(next).children().iter());
            self.free.push(next);
        }
    }

    // ---- shared helpers ------------------------------------------------

    /// True when `id` lies strictly inside the subtree rooted at
    /// `ancestor`.
    fn is_inside(&self, id: NodeId, ancestor: NodeId) -> bool {
        let mut current = id;
        while self.node(current).parent() != current {
            current = self.node(current).parent();
            if current == ancestor {
                return true;
            }
        }
        false
    }

    /// Absolute path of a node: parent-link walk up to the self-loop,
    /// reversed and joined.
    fn path_of(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = id;
        while self.node(current).parent() != current {
            segments.push(self.node(current).name().to_string());
            current = self.node(current).parent();
        }
        segments.reverse();
        format!("/{}", segments.join("/"))
    }

    fn file_content_mut(&mut self, path: &str) -> Result<&mut String> {
        let target = self.resolve(path)?;
        match &mut self.nodes[target.index()].kind {
            NodeKind::File { content } => Ok(content),
            NodeKind::Directory { .. } => Err(FsError::InvalidPathComponent(format!(
                "{path} is a directory"
            ))),
        }
    }

    /// Returns `candidate` if no child of `dir` carries it, otherwise the
    /// first free `candidate_1`, `candidate_2`, ...
    fn vacant_name(&self, dir: NodeId, candidate: &str) -> String {
        if self.child_by_name(dir, candidate).is_none() {
            return candidate.to_string();
        }
        for count in 1..RENAME_ATTEMPTS_MAX {
            let renamed = format!("{candidate}_{count}");
            if self.child_by_name(dir, &renamed).is_none() {
                return renamed;
            }
        }
        panic!("de-duplication of {candidate} exceeded {RENAME_ATTEMPTS_MAX} attempts");
    }

    /// DFS over an explicit stack; the traversal depth is independent of
    /// the call stack.
    fn search<F>(&self, matches: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut stack = vec![(String::from("."), self.cwd)];
        let mut found = Vec::new();
        while let Some((path, id)) = stack.pop() {
            let node = self.node(id);
            if matches(node.name()) {
                found.push(path.clone());
            }
            for &child in node.children() {
                stack.push((format!("{}/{}", path, self.node(child).name()), child));
            }
        }
        found
    }

    fn not_found(&self, component: &str, dir: NodeId) -> FsError {
        FsError::PathComponentNotFound {
            component: component.to_string(),
            dir: self.path_of(dir),
        }
    }
}
