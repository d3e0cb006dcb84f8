fn main() {
    // 生成代码统一输出到 proto_gen
    std::fs::create_dir_all("src/api/grpc/proto_gen").ok();

    tonic_build::configure()
        .build_server(true)
        .build_client(false)
        .file_descriptor_set_path("src/api/grpc/proto_gen/auth_descriptor.bin")
        .out_dir("src/api/grpc/proto_gen")
        .compile_protos(&["../../proto/authgate/v1/auth.proto"], &["../../proto"])
        .expect("Failed to compile auth.proto");

    println!("cargo:rerun-if-changed=../../proto/authgate/v1/auth.proto");
}
